use crate::context::RequestContext;
use std::io;

/// Defines a generic capability for issuing RPC calls.
///
/// Any struct that can move an encoded argument body to a peer and hand
/// back the raw result body (a client, or a server calling back out) can
/// implement this trait to gain the typed [`crate::MethodCall`] surface.
#[async_trait::async_trait]
pub trait ServiceCaller: Send + Sync {
    /// The caller's typed failure surface. Codec failures convert into it
    /// via `From<io::Error>`, so the blanket call sugar can propagate both
    /// transport and (de)serialization errors as one type.
    type Error: std::error::Error + From<io::Error> + Send + Sync + 'static;

    /// Sends one encoded argument body under `method` and returns the raw
    /// result body of the reply.
    async fn call_method(
        &self,
        method: &str,
        args_body: Vec<u8>,
        context: RequestContext,
    ) -> Result<Vec<u8>, Self::Error>;
}
