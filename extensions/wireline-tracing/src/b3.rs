use crate::TraceContext;
use std::collections::HashMap;

// Fixed header names consumed by downstream tracing backends. Changing any
// of these breaks cross-service trace stitching.

pub const TRACE_ID_HEADER: &str = "X-B3-TraceId";
pub const SPAN_ID_HEADER: &str = "X-B3-SpanId";
pub const PARENT_ID_HEADER: &str = "X-B3-ParentSpanId";
pub const SAMPLED_HEADER: &str = "X-B3-Sampled";

/// Header set by linked proxy infrastructure in front of a service.
pub const LINKED_INFRASTRUCTURE_HEADER: &str = "l5d-dst-service";

/// Renders `context` as propagation headers.
///
/// Trace id and span id are always written; the parent id only when
/// present, the sampled flag (`"1"`/`"0"`) only when explicitly decided.
/// No context at all yields an empty map; absent trace state is never
/// papered over with fabricated zero ids.
pub fn headers_for_trace_context(context: Option<&TraceContext>) -> HashMap<String, String> {
    let Some(context) = context else {
        return HashMap::new();
    };

    let mut headers = HashMap::new();
    headers.insert(TRACE_ID_HEADER.to_string(), context.trace_id.clone());
    headers.insert(SPAN_ID_HEADER.to_string(), context.span_id.clone());
    if let Some(parent_id) = &context.parent_id {
        headers.insert(PARENT_ID_HEADER.to_string(), parent_id.clone());
    }
    if let Some(sampled) = context.sampled {
        headers.insert(
            SAMPLED_HEADER.to_string(),
            if sampled { "1" } else { "0" }.to_string(),
        );
    }
    headers
}

/// Reads a propagated context back out of `headers`, case-insensitively.
///
/// Returns `None` unless both the trace id and span id are present; a
/// malformed sampled value is treated as undecided.
pub fn read_trace_context(headers: &HashMap<String, String>) -> Option<TraceContext> {
    let get = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    };

    let trace_id = get(TRACE_ID_HEADER)?;
    let span_id = get(SPAN_ID_HEADER)?;
    let sampled = get(SAMPLED_HEADER).and_then(|value| match value.as_str() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    });

    Some(TraceContext {
        trace_id,
        span_id,
        parent_id: get(PARENT_ID_HEADER),
        sampled,
    })
}

/// True when a known proxy header marks the request as having passed
/// through linked infrastructure.
pub fn has_linked_infrastructure_header(headers: &HashMap<String, String>) -> bool {
    headers
        .keys()
        .any(|key| key.eq_ignore_ascii_case(LINKED_INFRASTRUCTURE_HEADER))
}
