use super::varint::{read_varint32, zigzag_decode_i32};
use super::{EnvelopeError, MessageType, ProtocolKind, TransportKind, WireMessageEnvelope};
use crate::constants::{
    BINARY_TYPE_MASK, BINARY_VERSION_1, BINARY_VERSION_MASK, COMPACT_PROTOCOL_ID,
    COMPACT_TYPE_BITS, COMPACT_TYPE_SHIFT, COMPACT_VERSION, COMPACT_VERSION_MASK,
    FRAME_PREFIX_SIZE,
};

/// Reads the invoked method's name out of a serialized message.
///
/// Convenience form of [`read_envelope`] for callers that only filter on the
/// method name.
pub fn read_method_name(
    buffer: &[u8],
    transport: TransportKind,
    protocol: ProtocolKind,
) -> Result<String, EnvelopeError> {
    Ok(read_envelope(buffer, transport, protocol)?.method_name)
}

/// Parses the transport framing and protocol message header of `buffer`.
///
/// Only the envelope needs to be well-formed; the struct body past the
/// header is never examined, so the cost is proportional to the header
/// size, not the payload size. Malformed headers fail with a specific
/// [`EnvelopeError`] variant.
pub fn read_envelope(
    buffer: &[u8],
    transport: TransportKind,
    protocol: ProtocolKind,
) -> Result<WireMessageEnvelope, EnvelopeError> {
    let start = match transport {
        TransportKind::Buffered => 0,
        TransportKind::Framed => {
            if buffer.len() < FRAME_PREFIX_SIZE {
                return Err(EnvelopeError::TruncatedHeader);
            }
            FRAME_PREFIX_SIZE
        }
    };

    match protocol {
        ProtocolKind::Binary => read_binary_header(buffer, start, transport),
        ProtocolKind::Compact => read_compact_header(buffer, start, transport),
    }
}

fn read_i32_be(buf: &[u8], pos: usize) -> Result<(i32, usize), EnvelopeError> {
    let end = pos.checked_add(4).ok_or(EnvelopeError::TruncatedHeader)?;
    let bytes: [u8; 4] = buf
        .get(pos..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(EnvelopeError::TruncatedHeader)?;
    Ok((i32::from_be_bytes(bytes), end))
}

fn read_name(buf: &[u8], pos: usize, len: usize) -> Result<(String, usize), EnvelopeError> {
    let end = pos.checked_add(len).ok_or(EnvelopeError::TruncatedHeader)?;
    let bytes = buf.get(pos..end).ok_or(EnvelopeError::TruncatedHeader)?;
    let name = std::str::from_utf8(bytes)
        .map_err(|_| EnvelopeError::InvalidMethodName)?
        .to_string();
    Ok((name, end))
}

fn read_binary_header(
    buffer: &[u8],
    start: usize,
    transport: TransportKind,
) -> Result<WireMessageEnvelope, EnvelopeError> {
    let (version_word, pos) = read_i32_be(buffer, start)?;
    if version_word >= 0 {
        // Strict mode only: an unversioned header is a first i32 holding the
        // method-name length, which is always non-negative.
        return Err(EnvelopeError::MissingVersionHeader);
    }
    let version_word = version_word as u32;
    if version_word & BINARY_VERSION_MASK != BINARY_VERSION_1 {
        return Err(EnvelopeError::UnsupportedProtocolVersion);
    }
    let type_byte = (version_word & BINARY_TYPE_MASK) as u8;
    let message_type = MessageType::try_from(type_byte)
        .map_err(|_| EnvelopeError::UnknownMessageType(type_byte))?;

    let (name_len, pos) = read_i32_be(buffer, pos)?;
    if name_len < 0 {
        return Err(EnvelopeError::InvalidMethodName);
    }
    let (method_name, pos) = read_name(buffer, pos, name_len as usize)?;
    let (sequence_id, pos) = read_i32_be(buffer, pos)?;

    Ok(WireMessageEnvelope {
        method_name,
        message_type,
        sequence_id,
        protocol: ProtocolKind::Binary,
        transport,
        header_len: pos,
    })
}

fn read_compact_header(
    buffer: &[u8],
    start: usize,
    transport: TransportKind,
) -> Result<WireMessageEnvelope, EnvelopeError> {
    let protocol_id = *buffer.get(start).ok_or(EnvelopeError::TruncatedHeader)?;
    if protocol_id != COMPACT_PROTOCOL_ID {
        return Err(EnvelopeError::UnknownProtocolId(protocol_id));
    }
    let version_type = *buffer.get(start + 1).ok_or(EnvelopeError::TruncatedHeader)?;
    if version_type & COMPACT_VERSION_MASK != COMPACT_VERSION {
        return Err(EnvelopeError::UnsupportedProtocolVersion);
    }
    let type_bits = (version_type >> COMPACT_TYPE_SHIFT) & COMPACT_TYPE_BITS;
    let message_type = MessageType::try_from(type_bits)
        .map_err(|_| EnvelopeError::UnknownMessageType(type_bits))?;

    let (sequence_raw, pos) = read_varint32(buffer, start + 2)?;
    let sequence_id = zigzag_decode_i32(sequence_raw);
    let (name_len, pos) = read_varint32(buffer, pos)?;
    let (method_name, pos) = read_name(buffer, pos, name_len as usize)?;

    Ok(WireMessageEnvelope {
        method_name,
        message_type,
        sequence_id,
        protocol: ProtocolKind::Compact,
        transport,
        header_len: pos,
    })
}
