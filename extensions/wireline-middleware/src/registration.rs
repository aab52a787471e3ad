use futures::future::BoxFuture;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use wireline_rpc_service::RequestContext;

/// Boxed error type middleware handlers may fail with. The error's display
/// text is preserved verbatim as the call's failure message.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A data handler transforms the serialized message buffer.
pub type DataHandlerFn =
    Arc<dyn Fn(Vec<u8>) -> BoxFuture<'static, Result<Vec<u8>, HandlerError>> + Send + Sync>;

/// A context handler transforms the transport request options.
pub type ContextHandlerFn = Arc<
    dyn Fn(RequestContext) -> BoxFuture<'static, Result<RequestContext, HandlerError>>
        + Send
        + Sync,
>;

/// Which side of a call a registration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareDirection {
    /// Runs on received buffers, before they are decoded or dispatched.
    Incoming,
    /// Runs on buffers and contexts about to be sent.
    Outgoing,
}

/// Method-name scoping for one registration.
#[derive(Debug, Clone)]
pub enum MethodFilter {
    /// Applies to every method.
    All,
    /// Applies only to the named methods; everything else passes through
    /// untouched.
    Only(HashSet<String>),
}

impl MethodFilter {
    pub fn only<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MethodFilter::Only(methods.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, method: &str) -> bool {
        match self {
            MethodFilter::All => true,
            MethodFilter::Only(methods) => methods.contains(method),
        }
    }
}

/// The handler payload of a registration, tagged by what it transforms.
///
/// Validating the handler kind here, at construction, keeps the pipeline
/// executor free of any runtime shape checks.
#[derive(Clone)]
pub enum MiddlewareHandler {
    Data(DataHandlerFn),
    Context(ContextHandlerFn),
}

/// One entry in a middleware pipeline.
///
/// Registrations happen once, at client or server construction, and are
/// immutable afterwards. Their order is the pipeline's execution order.
#[derive(Clone)]
pub struct MiddlewareRegistration {
    pub direction: MiddlewareDirection,
    pub filter: MethodFilter,
    pub handler: MiddlewareHandler,
}

impl MiddlewareRegistration {
    /// Registers a handler over the serialized message buffer.
    pub fn data<F, Fut>(direction: MiddlewareDirection, handler: F) -> Self
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, HandlerError>> + Send + 'static,
    {
        MiddlewareRegistration {
            direction,
            filter: MethodFilter::All,
            handler: MiddlewareHandler::Data(Arc::new(move |buffer| {
                Box::pin(handler(buffer)) as BoxFuture<'static, Result<Vec<u8>, HandlerError>>
            })),
        }
    }

    /// Registers a handler over the transport request context.
    pub fn context<F, Fut>(direction: MiddlewareDirection, handler: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RequestContext, HandlerError>> + Send + 'static,
    {
        MiddlewareRegistration {
            direction,
            filter: MethodFilter::All,
            handler: MiddlewareHandler::Context(Arc::new(move |context| {
                Box::pin(handler(context))
                    as BoxFuture<'static, Result<RequestContext, HandlerError>>
            })),
        }
    }

    /// Restricts the registration to the named methods.
    pub fn for_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = MethodFilter::only(methods);
        self
    }
}

impl fmt::Debug for MiddlewareRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.handler {
            MiddlewareHandler::Data(_) => "data",
            MiddlewareHandler::Context(_) => "context",
        };
        f.debug_struct("MiddlewareRegistration")
            .field("direction", &self.direction)
            .field("filter", &self.filter)
            .field("kind", &kind)
            .finish()
    }
}
