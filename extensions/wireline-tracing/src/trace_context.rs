/// Identifiers propagated with one logical request.
///
/// One `TraceContext` exists per in-flight call; its identifiers never
/// change during that call's lifetime. An unset `sampled` means the
/// receiving tracer decides with its own sampling policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub parent_id: Option<String>,
    pub sampled: Option<bool>,
}

impl TraceContext {
    /// A fresh root context. The root span reuses the trace id as its span
    /// id, so a downstream child can always name its parent.
    pub fn new_root() -> Self {
        let id = random_lower_hex_64();
        TraceContext {
            trace_id: id.clone(),
            span_id: id,
            parent_id: None,
            sampled: None,
        }
    }

    /// A child context for one hop beneath this one: same trace id, a new
    /// span id, and this span as the parent. The sampling decision is
    /// inherited.
    pub fn child(&self) -> Self {
        TraceContext {
            trace_id: self.trace_id.clone(),
            span_id: random_lower_hex_64(),
            parent_id: Some(self.span_id.clone()),
            sampled: self.sampled,
        }
    }
}

/// 64 random bits as 16 lowercase hex characters, the trace-id wire shape.
pub(crate) fn random_lower_hex_64() -> String {
    format!("{:016x}", rand::random::<u64>())
}
