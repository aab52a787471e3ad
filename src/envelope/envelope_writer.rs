use super::varint::{write_varint32, zigzag_encode_i32};
use super::{MessageType, ProtocolKind, TransportKind};
use crate::constants::{
    BINARY_VERSION_1, COMPACT_PROTOCOL_ID, COMPACT_TYPE_SHIFT, COMPACT_VERSION,
};

/// Serializes a message header: the exact bytes
/// [`super::read_envelope`] parses back.
pub fn write_message_begin(
    protocol: ProtocolKind,
    method: &str,
    message_type: MessageType,
    sequence_id: i32,
) -> Vec<u8> {
    match protocol {
        ProtocolKind::Binary => {
            let mut buf = Vec::with_capacity(12 + method.len());
            let version_word = BINARY_VERSION_1 | u32::from(u8::from(message_type));
            buf.extend(&version_word.to_be_bytes());
            buf.extend(&(method.len() as i32).to_be_bytes());
            buf.extend(method.as_bytes());
            buf.extend(&sequence_id.to_be_bytes());
            buf
        }
        ProtocolKind::Compact => {
            let mut buf = Vec::with_capacity(4 + method.len());
            buf.push(COMPACT_PROTOCOL_ID);
            buf.push((u8::from(message_type) << COMPACT_TYPE_SHIFT) | COMPACT_VERSION);
            write_varint32(&mut buf, zigzag_encode_i32(sequence_id));
            write_varint32(&mut buf, method.len() as u32);
            buf.extend(method.as_bytes());
            buf
        }
    }
}

/// Builds a complete serialized message: header, body, and transport
/// framing.
///
/// `Framed` prepends a big-endian length prefix covering everything after
/// the prefix itself; `Buffered` emits header and body back to back.
pub fn build_message(
    transport: TransportKind,
    protocol: ProtocolKind,
    method: &str,
    message_type: MessageType,
    sequence_id: i32,
    body: &[u8],
) -> Vec<u8> {
    let header = write_message_begin(protocol, method, message_type, sequence_id);
    match transport {
        TransportKind::Buffered => {
            let mut buf = header;
            buf.extend(body);
            buf
        }
        TransportKind::Framed => {
            let frame_len = (header.len() + body.len()) as u32;
            let mut buf = Vec::with_capacity(4 + header.len() + body.len());
            buf.extend(&frame_len.to_be_bytes());
            buf.extend(&header);
            buf.extend(body);
            buf
        }
    }
}
