mod endpoint;
pub use endpoint::*;
mod error;
pub use error::*;
mod rpc_server;
pub use rpc_server::*;
pub mod utils;
