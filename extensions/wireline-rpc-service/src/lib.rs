mod caller_interface;
pub use caller_interface::*;
mod context;
pub use context::*;
mod method_call;
pub use method_call::*;
mod service_method;
pub use service_method::*;
pub mod constants;
pub use constants::*;
