use crate::{TraceRecord, Tracer};
use std::collections::HashMap;
use std::sync::Arc;
use wireline::envelope::{ProtocolKind, TransportKind, read_method_name};

/// Inbound tracing hook installed by a server decorator.
///
/// Wraps one request's dispatch: [`TracingLayer::begin`] runs before the
/// handler and derives the call's trace state, [`TracingLayer::finish`]
/// runs after it (success or failure) and records the response status
/// under the same trace id.
pub struct TracingLayer {
    tracer: Arc<Tracer>,
    transport: TransportKind,
    protocol: ProtocolKind,
}

impl TracingLayer {
    pub fn new(tracer: Arc<Tracer>, transport: TransportKind, protocol: ProtocolKind) -> Self {
        TracingLayer {
            tracer,
            transport,
            protocol,
        }
    }

    pub fn tracer(&self) -> &Arc<Tracer> {
        &self.tracer
    }

    /// Starts the span for one inbound request buffer.
    ///
    /// The span is named after the envelope's method name; when the buffer
    /// cannot be inspected (the request may not even be an RPC message
    /// yet), the transport's own verb is used instead so the request is
    /// still traced.
    pub fn begin(
        &self,
        buffer: &[u8],
        transport_verb: &str,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> TraceRecord {
        let name = read_method_name(buffer, self.transport, self.protocol)
            .unwrap_or_else(|_| transport_verb.to_string());
        self.tracer.record_request(&name, url, headers)
    }

    /// Completes `record` with the response status.
    pub fn finish(&self, record: TraceRecord, status: u16) {
        self.tracer.record_response(record, status);
    }
}
