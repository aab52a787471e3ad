use crate::EndpointError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;
use wireline_rpc_service::{RequestContext, ServiceMethod};

/// A registered method handler over raw body bytes.
pub type RawHandlerFn = Arc<
    dyn Fn(
            Vec<u8>,
            RequestContext,
        ) -> Pin<
            Box<
                dyn Future<Output = Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>>
                    + Send,
            >,
        > + Send
        + Sync,
>;

/// The name-keyed handler registry behind an RPC server.
///
/// Handlers register once, during startup, and are looked up per request by
/// the method name the envelope carries. A handler's `Err` becomes a remote
/// fault reply whose message is the error's display text, verbatim; that is
/// how a service-declared failure like "Unauthorized" reaches the calling
/// side intact.
pub struct ServiceEndpoint {
    handlers: Arc<Mutex<HashMap<String, RawHandlerFn>>>,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceEndpoint {
    pub fn new() -> Self {
        ServiceEndpoint {
            handlers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a handler over raw body bytes; rejects duplicates.
    pub async fn register_raw<F, Fut>(&self, method: &str, handler: F) -> Result<(), EndpointError>
    where
        F: Fn(Vec<u8>, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>>
            + Send
            + 'static,
    {
        let mut handlers = self.handlers.lock().await;
        match handlers.entry(method.to_string()) {
            Entry::Occupied(_) => Err(EndpointError::DuplicateHandler(method.to_string())),
            Entry::Vacant(entry) => {
                let wrapped = move |bytes: Vec<u8>, context: RequestContext| {
                    Box::pin(handler(bytes, context))
                        as Pin<Box<dyn Future<Output = _> + Send>>
                };
                entry.insert(Arc::new(wrapped));
                Ok(())
            }
        }
    }

    /// Registers a typed handler for `M`: argument bytes are decoded before
    /// `handler` runs and its result is encoded afterwards, so the handler
    /// only sees the method's own types.
    pub async fn register_method<M, F, Fut>(&self, handler: F) -> Result<(), EndpointError>
    where
        M: ServiceMethod + Send + Sync + 'static,
        M::Args: Send + 'static,
        M::Ret: Send + 'static,
        F: Fn(M::Args, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M::Ret, Box<dyn std::error::Error + Send + Sync>>>
            + Send
            + 'static,
    {
        let handler = Arc::new(handler);
        self.register_raw(M::NAME, move |bytes: Vec<u8>, context: RequestContext| {
            let handler = handler.clone();
            async move {
                let args = M::decode_args(&bytes)?;
                let ret = handler(args, context).await?;
                Ok(M::encode_ret(ret)?)
            }
        })
        .await
    }

    /// Runs the handler registered under `method`, if any.
    pub async fn dispatch(
        &self,
        method: &str,
        body: Vec<u8>,
        context: RequestContext,
    ) -> Option<Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>> {
        let handler = { self.handlers.lock().await.get(method).cloned() };
        match handler {
            Some(handler) => Some(handler(body, context).await),
            None => None,
        }
    }
}
