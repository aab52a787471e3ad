use std::collections::HashMap;
use std::sync::Arc;
use wireline::envelope::{MessageType, ProtocolKind, TransportKind, build_message};
use wireline_middleware::{MiddlewareDirection, MiddlewarePipeline};
use wireline_rpc_service::RequestContext;
use wireline_tracing::{
    CountingSampler, PARENT_ID_HEADER, SAMPLED_HEADER, SPAN_ID_HEADER, TRACE_ID_HEADER,
    TraceContext, TracerConfig, TracerRegistry, TracingLayer, headers_for_trace_context,
    read_trace_context, trace_propagation_middleware,
};

fn sample_context() -> TraceContext {
    TraceContext {
        trace_id: "48485a3953bb6124".to_string(),
        span_id: "bd7a977555f6b982".to_string(),
        parent_id: None,
        sampled: None,
    }
}

#[test]
fn test_no_trace_context_yields_empty_headers() {
    assert!(headers_for_trace_context(None).is_empty());
}

#[test]
fn test_headers_omit_absent_fields() {
    let headers = headers_for_trace_context(Some(&sample_context()));
    assert_eq!(
        headers.get(TRACE_ID_HEADER).map(String::as_str),
        Some("48485a3953bb6124")
    );
    assert_eq!(
        headers.get(SPAN_ID_HEADER).map(String::as_str),
        Some("bd7a977555f6b982")
    );
    assert!(!headers.contains_key(PARENT_ID_HEADER));
    assert!(!headers.contains_key(SAMPLED_HEADER));
}

#[test]
fn test_headers_round_trip_with_all_fields() {
    let mut context = sample_context();
    context.parent_id = Some("f0e1d2c3b4a59687".to_string());
    context.sampled = Some(true);

    let headers = headers_for_trace_context(Some(&context));
    assert_eq!(headers.get(SAMPLED_HEADER).map(String::as_str), Some("1"));

    let parsed = read_trace_context(&headers).unwrap();
    assert_eq!(parsed, context);
}

#[test]
fn test_read_trace_context_is_case_insensitive() {
    let mut headers = HashMap::new();
    headers.insert("x-b3-traceid".to_string(), "abc".to_string());
    headers.insert("X-B3-SPANID".to_string(), "def".to_string());
    headers.insert("x-b3-sampled".to_string(), "0".to_string());

    let parsed = read_trace_context(&headers).unwrap();
    assert_eq!(parsed.trace_id, "abc");
    assert_eq!(parsed.span_id, "def");
    assert_eq!(parsed.sampled, Some(false));
}

#[test]
fn test_read_trace_context_requires_both_ids() {
    let mut headers = HashMap::new();
    headers.insert(TRACE_ID_HEADER.to_string(), "abc".to_string());
    assert!(read_trace_context(&headers).is_none());
    assert!(read_trace_context(&HashMap::new()).is_none());
}

#[test]
fn test_registry_memoizes_per_service_name() {
    let registry = TracerRegistry::new();
    let config = TracerConfig::default();

    let first = registry.get_tracer_for_service("svc-a", &config);
    let second = registry.get_tracer_for_service("svc-a", &config);
    assert!(Arc::ptr_eq(&first, &second));

    let other = registry.get_tracer_for_service("svc-b", &config);
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(other.service_name(), "svc-b");
}

#[test]
fn test_counting_sampler_rates() {
    let always = CountingSampler::new(1.0);
    assert!((0..10).all(|_| always.is_sampled()));

    let never = CountingSampler::new(0.0);
    assert!((0..10).all(|_| !never.is_sampled()));

    // Rate 0.5 samples every second decision, starting with the first.
    let half = CountingSampler::new(0.5);
    let decisions: Vec<bool> = (0..6).map(|_| half.is_sampled()).collect();
    assert_eq!(decisions, [true, false, true, false, true, false]);
}

#[test]
fn test_debug_config_always_samples() {
    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service(
        "svc-debug",
        &TracerConfig {
            debug: true,
            sample_rate: Some(0.0),
            ..TracerConfig::default()
        },
    );
    for _ in 0..5 {
        assert_eq!(tracer.start_trace().sampled, Some(true));
    }
}

#[test]
fn test_child_context_links_to_parent() {
    let parent = TraceContext {
        sampled: Some(true),
        ..sample_context()
    };
    let child = parent.child();

    assert_eq!(child.trace_id, parent.trace_id);
    assert_ne!(child.span_id, parent.span_id);
    assert_eq!(child.parent_id.as_deref(), Some(parent.span_id.as_str()));
    assert_eq!(child.sampled, Some(true));
}

#[test]
fn test_root_context_reuses_trace_id_as_span_id() {
    let root = TraceContext::new_root();
    assert_eq!(root.trace_id, root.span_id);
    assert_eq!(root.trace_id.len(), 16);
    assert!(root.trace_id.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[test]
fn test_record_request_joins_incoming_trace() {
    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service("svc-join", &TracerConfig::default());

    let mut headers = HashMap::new();
    headers.insert(TRACE_ID_HEADER.to_string(), "abc".to_string());
    headers.insert(SPAN_ID_HEADER.to_string(), "def".to_string());
    headers.insert(SAMPLED_HEADER.to_string(), "1".to_string());
    headers.insert("l5d-dst-service".to_string(), "svc-join".to_string());

    let record = tracer.record_request("add", "http://localhost/rpc", &headers);
    assert_eq!(record.context.trace_id, "abc");
    assert_eq!(record.context.span_id, "def");
    assert_eq!(record.context.sampled, Some(true));
    assert!(record.uses_linked_infrastructure);

    // Identifiers never change once derived for a call.
    tracer.record_response(record, 200);
}

#[test]
fn test_layer_falls_back_to_transport_verb() {
    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service("svc-layer", &TracerConfig::default());
    let layer = TracingLayer::new(tracer, TransportKind::Buffered, ProtocolKind::Binary);

    let record = layer.begin(b"not an envelope", "POST", "http://localhost/rpc", &HashMap::new());
    assert_eq!(record.name, "POST");

    let message = build_message(
        TransportKind::Buffered,
        ProtocolKind::Binary,
        "add",
        MessageType::Call,
        1,
        &[],
    );
    let record = layer.begin(&message, "POST", "http://localhost/rpc", &HashMap::new());
    assert_eq!(record.name, "add");
}

#[tokio::test]
async fn test_propagation_middleware_injects_headers() {
    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service(
        "svc-client",
        &TracerConfig {
            debug: true,
            ..TracerConfig::default()
        },
    );

    let pipeline = MiddlewarePipeline::with_registrations(
        TransportKind::Buffered,
        ProtocolKind::Binary,
        vec![trace_propagation_middleware(tracer)],
    );

    let context = pipeline
        .run_context(MiddlewareDirection::Outgoing, "add", RequestContext::new())
        .await
        .unwrap();

    let derived = read_trace_context(&context.headers).unwrap();
    assert_eq!(derived.trace_id.len(), 16);
    assert_eq!(derived.sampled, Some(true));
    assert!(derived.parent_id.is_none());
}

#[tokio::test]
async fn test_propagation_middleware_continues_upstream_trace() {
    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service(
        "svc-relay",
        &TracerConfig {
            debug: true,
            ..TracerConfig::default()
        },
    );

    let pipeline = MiddlewarePipeline::with_registrations(
        TransportKind::Buffered,
        ProtocolKind::Binary,
        vec![trace_propagation_middleware(tracer)],
    );

    let upstream = RequestContext::new()
        .with_header(TRACE_ID_HEADER, "48485a3953bb6124")
        .with_header(SPAN_ID_HEADER, "bd7a977555f6b982");
    let context = pipeline
        .run_context(MiddlewareDirection::Outgoing, "add", upstream)
        .await
        .unwrap();

    let derived = read_trace_context(&context.headers).unwrap();
    assert_eq!(derived.trace_id, "48485a3953bb6124");
    assert_ne!(derived.span_id, "bd7a977555f6b982");
    assert_eq!(derived.parent_id.as_deref(), Some("bd7a977555f6b982"));
}
