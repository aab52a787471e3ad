use super::{MessageType, ProtocolKind, TransportKind};

/// The minimal parsed header of an RPC message.
///
/// This is a derived, read-only view over a serialized buffer: only the
/// transport framing and the protocol message header are decoded, the struct
/// body past [`WireMessageEnvelope::header_len`] is never touched or copied.
/// Parse it once per buffer with [`super::read_envelope`] and keep it for
/// the scope of that one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessageEnvelope {
    /// The invoked method's wire name.
    pub method_name: String,

    /// The call kind announced by the header.
    pub message_type: MessageType,

    /// Correlates a reply envelope with the call that produced it.
    pub sequence_id: i32,

    /// Encoding format the header was parsed under.
    pub protocol: ProtocolKind,

    /// Framing the buffer was parsed under.
    pub transport: TransportKind,

    /// Offset of the first body byte within the inspected buffer.
    pub header_len: usize,
}

impl WireMessageEnvelope {
    /// The struct body following this envelope within `buffer`.
    ///
    /// `buffer` must be the same buffer this envelope was parsed from.
    pub fn body<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.header_len.min(buffer.len())..]
    }
}
