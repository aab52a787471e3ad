/// How message boundaries are delimited on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TransportKind {
    /// No delimiter; the protocol header starts at offset 0.
    #[default]
    Buffered,
    /// A 4-byte big-endian length prefix precedes the protocol header.
    Framed,
}

impl TransportKind {
    /// Resolves a configuration name ("buffered" or "framed"), case
    /// insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "buffered" => Some(TransportKind::Buffered),
            "framed" => Some(TransportKind::Framed),
            _ => None,
        }
    }

    pub fn as_name(&self) -> &'static str {
        match self {
            TransportKind::Buffered => "buffered",
            TransportKind::Framed => "framed",
        }
    }
}
