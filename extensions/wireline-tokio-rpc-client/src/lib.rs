mod error;
pub use error::*;
mod http_transport;
pub use http_transport::*;
mod rpc_client;
pub use rpc_client::*;
mod transport;
pub use transport::*;
