use crate::ClientError;
use std::collections::HashMap;
use wireline_rpc_service::RequestContext;

/// Raw response handed back by a transport send.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// The capability of moving one serialized request to a peer and returning
/// its raw response.
///
/// The client wraps this, it never replaces it: middleware, envelope
/// handling, and error mapping all live above the trait, so a test double
/// (or an entirely different carrier) only has to implement `send`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        buffer: Vec<u8>,
        context: &RequestContext,
    ) -> Result<TransportResponse, ClientError>;
}
