use std::collections::HashMap;
use std::time::Duration;

/// Transport-level request options attached to one call.
///
/// A caller may supply a context per call; outgoing context middleware
/// receives it afterwards and has final say over its contents. Header
/// lookups are case-insensitive, while stored keys keep whatever spelling
/// they were inserted with.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Header fields sent with (or received on) the request.
    pub headers: HashMap<String, String>,

    /// Per-call deadline enforced by the transport. `None` means the
    /// client's configured default, or no deadline at all.
    pub timeout: Option<Duration>,
}

impl RequestContext {
    pub fn new() -> Self {
        RequestContext::default()
    }

    /// Builder form of [`RequestContext::set_header`].
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Inserts a header, replacing any existing entry whose key differs
    /// only in case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Merges `other` over `self`: headers from `other` win on conflict,
    /// and its timeout (when set) replaces this one.
    pub fn merge(mut self, other: RequestContext) -> RequestContext {
        for (name, value) in other.headers {
            self.set_header(name, value);
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        self
    }
}

/// Rewrites every header key to lowercase.
///
/// Inbound HTTP stacks disagree on header-key casing; servers normalize
/// once at the edge so downstream lookups can be plain map hits.
pub fn normalize_headers(headers: HashMap<String, String>) -> HashMap<String, String> {
    headers
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}
