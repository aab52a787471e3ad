use crate::{
    CountingSampler, Endpoint, Span, SpanKind, SpanRecorder, TraceContext,
    has_linked_infrastructure_header, read_trace_context,
};
use std::collections::HashMap;
use std::sync::Arc;
use wireline::utils::now;

/// Derives and records trace identifiers for one service.
///
/// Obtain instances through
/// [`crate::TracerRegistry::get_tracer_for_service`], which caches one
/// tracer per service name for the registry's lifetime.
pub struct Tracer {
    service_name: String,
    sampler: CountingSampler,
    recorder: Arc<dyn SpanRecorder>,
}

/// An in-flight request span: the derived context plus everything needed to
/// finish the record once the response status is known.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    pub context: TraceContext,
    /// Set when a known proxy header marked the request as arriving through
    /// linked infrastructure.
    pub uses_linked_infrastructure: bool,
    pub name: String,
    pub url: String,
    started_at: u64,
}

impl Tracer {
    pub fn new(
        service_name: impl Into<String>,
        sampler: CountingSampler,
        recorder: Arc<dyn SpanRecorder>,
    ) -> Self {
        Tracer {
            service_name: service_name.into(),
            sampler,
            recorder,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Root context for a call this process originates. The sampling
    /// decision is made here and travels with the trace.
    pub fn start_trace(&self) -> TraceContext {
        let mut context = TraceContext::new_root();
        context.sampled = Some(self.sampler.is_sampled());
        context
    }

    /// Child context for an outgoing call beneath `parent`.
    pub fn child_of(&self, parent: &TraceContext) -> TraceContext {
        parent.child()
    }

    /// Continues a trace received from an upstream caller. The server side
    /// joins the caller's span (same ids) and only decides sampling when
    /// the caller left it undecided.
    pub fn join_trace(&self, mut incoming: TraceContext) -> TraceContext {
        if incoming.sampled.is_none() {
            incoming.sampled = Some(self.sampler.is_sampled());
        }
        incoming
    }

    /// Starts the server-side span for one inbound request, reading
    /// propagation headers case-insensitively.
    pub fn record_request(
        &self,
        name: &str,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> TraceRecord {
        let context = match read_trace_context(headers) {
            Some(incoming) => self.join_trace(incoming),
            None => self.start_trace(),
        };
        tracing::trace!(
            trace_id = %context.trace_id,
            span_id = %context.span_id,
            %name,
            "request span started"
        );
        TraceRecord {
            context,
            uses_linked_infrastructure: has_linked_infrastructure_header(headers),
            name: name.to_string(),
            url: url.to_string(),
            started_at: now(),
        }
    }

    /// Completes `record` under the same trace id, tagging the response
    /// status. Unsampled traces are dropped without touching the recorder.
    pub fn record_response(&self, record: TraceRecord, status: u16) {
        if record.context.sampled == Some(false) {
            return;
        }
        let mut tags = HashMap::new();
        tags.insert("http.status_code".to_string(), status.to_string());
        if !record.url.is_empty() {
            tags.insert("http.url".to_string(), record.url);
        }

        self.recorder.record(Span {
            trace_id: record.context.trace_id,
            span_id: record.context.span_id,
            parent_id: record.context.parent_id,
            name: record.name,
            kind: SpanKind::Server,
            timestamp: record.started_at,
            duration: Some(now().saturating_sub(record.started_at)),
            local_endpoint: Endpoint {
                service_name: self.service_name.clone(),
            },
            tags,
        });
    }
}
