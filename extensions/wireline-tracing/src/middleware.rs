use crate::{Tracer, headers_for_trace_context, read_trace_context};
use std::sync::Arc;
use wireline_middleware::{MiddlewareDirection, MiddlewareRegistration};
use wireline_rpc_service::RequestContext;

/// Builds the outgoing context-middleware registration that stamps trace
/// propagation headers onto every call a client makes.
///
/// Each call derives its identifiers exactly once: a child of the trace
/// already present on the call's context (an upstream server handing its
/// state down), or a fresh root when there is none.
pub fn trace_propagation_middleware(tracer: Arc<Tracer>) -> MiddlewareRegistration {
    MiddlewareRegistration::context(MiddlewareDirection::Outgoing, move |mut context| {
        let tracer = tracer.clone();
        async move {
            let derived = match read_trace_context(&context.headers) {
                Some(parent) => tracer.child_of(&parent),
                None => tracer.start_trace(),
            };
            for (name, value) in headers_for_trace_context(Some(&derived)) {
                context.set_header(name, value);
            }
            Ok::<RequestContext, _>(context)
        }
    })
}
