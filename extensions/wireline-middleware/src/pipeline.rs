use crate::{
    MiddlewareDirection, MiddlewareError, MiddlewareHandler, MiddlewareRegistration,
};
use wireline::envelope::{ProtocolKind, TransportKind, read_method_name};
use wireline_rpc_service::RequestContext;

/// An ordered registry of middleware, executed per call.
///
/// Handlers of a given (kind, direction) pair run strictly in registration
/// order, each awaited before the next starts, so later entries observe
/// earlier entries' transforms. The first handler rejection aborts the run
/// and becomes the call's failure; handlers excluded by their method filter
/// are skipped without being invoked, which counts as neither success nor
/// failure.
pub struct MiddlewarePipeline {
    entries: Vec<MiddlewareRegistration>,
    transport: TransportKind,
    protocol: ProtocolKind,
}

impl MiddlewarePipeline {
    pub fn new(transport: TransportKind, protocol: ProtocolKind) -> Self {
        MiddlewarePipeline {
            entries: Vec::new(),
            transport,
            protocol,
        }
    }

    /// Builds a pipeline from an already-ordered registration list.
    pub fn with_registrations(
        transport: TransportKind,
        protocol: ProtocolKind,
        entries: Vec<MiddlewareRegistration>,
    ) -> Self {
        MiddlewarePipeline {
            entries,
            transport,
            protocol,
        }
    }

    /// Appends an entry. Registration happens at construction time; the
    /// pipeline is not meant to change once calls are flowing.
    pub fn register(&mut self, entry: MiddlewareRegistration) {
        self.entries.push(entry);
    }

    /// Runs the data handlers of `direction` over `buffer`.
    ///
    /// The method name used for filtering is resolved once, from the buffer
    /// this invocation was handed. A handler that rewrites the method name
    /// mid-pipeline is therefore still filtered under the originally
    /// resolved name; re-resolution is the rewriting handler's own job if
    /// it needs later filters to see the rewrite.
    pub async fn run_data(
        &self,
        direction: MiddlewareDirection,
        buffer: Vec<u8>,
    ) -> Result<Vec<u8>, MiddlewareError> {
        let has_data_handlers = self.entries.iter().any(|entry| {
            entry.direction == direction && matches!(entry.handler, MiddlewareHandler::Data(_))
        });
        if !has_data_handlers {
            return Ok(buffer);
        }

        let method_name = read_method_name(&buffer, self.transport, self.protocol)?;

        let mut acc = buffer;
        for entry in &self.entries {
            if entry.direction != direction {
                continue;
            }
            let MiddlewareHandler::Data(handler) = &entry.handler else {
                continue;
            };
            if !entry.filter.matches(&method_name) {
                tracing::trace!(method = %method_name, "data middleware skipped by method filter");
                continue;
            }
            acc = handler(acc).await.map_err(|err| {
                tracing::debug!(method = %method_name, %err, "data middleware rejected call");
                MiddlewareError::Rejected {
                    message: err.to_string(),
                }
            })?;
        }
        Ok(acc)
    }

    /// Runs the context handlers of `direction` over `context`.
    ///
    /// Unlike [`MiddlewarePipeline::run_data`], the method name comes from
    /// the caller: a client knows it statically, a server resolves it from
    /// the inbound buffer before invoking this.
    pub async fn run_context(
        &self,
        direction: MiddlewareDirection,
        method_name: &str,
        context: RequestContext,
    ) -> Result<RequestContext, MiddlewareError> {
        let mut acc = context;
        for entry in &self.entries {
            if entry.direction != direction {
                continue;
            }
            let MiddlewareHandler::Context(handler) = &entry.handler else {
                continue;
            };
            if !entry.filter.matches(method_name) {
                tracing::trace!(method = %method_name, "context middleware skipped by method filter");
                continue;
            }
            acc = handler(acc).await.map_err(|err| {
                tracing::debug!(method = %method_name, %err, "context middleware rejected call");
                MiddlewareError::Rejected {
                    message: err.to_string(),
                }
            })?;
        }
        Ok(acc)
    }
}
