/// Encoding format of a message envelope and its body.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ProtocolKind {
    /// Fixed-width big-endian header fields with a strict version word.
    #[default]
    Binary,
    /// Varint-compressed header fields behind a protocol-id byte.
    Compact,
}

impl ProtocolKind {
    /// Resolves a configuration name ("binary" or "compact"), case
    /// insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "binary" => Some(ProtocolKind::Binary),
            "compact" => Some(ProtocolKind::Compact),
            _ => None,
        }
    }

    pub fn as_name(&self) -> &'static str {
        match self {
            ProtocolKind::Binary => "binary",
            ProtocolKind::Compact => "compact",
        }
    }
}
