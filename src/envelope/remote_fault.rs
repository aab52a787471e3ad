use super::varint::{read_varint32, write_varint32, zigzag_decode_i32, zigzag_encode_i32};
use super::{EnvelopeError, ProtocolKind};
use crate::constants::{
    BINARY_FIELD_TYPE_I32, BINARY_FIELD_TYPE_STRING, COMPACT_FIELD_TYPE_BINARY,
    COMPACT_FIELD_TYPE_I32, FIELD_TYPE_STOP,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Classification codes carried in a fault body. The numeric values are a
/// wire contract shared with every peer implementation.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum RemoteFaultKind {
    Unknown = 0,
    UnknownMethod = 1,
    InvalidMessageType = 2,
    WrongMethodName = 3,
    BadSequenceId = 4,
    MissingResult = 5,
    InternalError = 6,
    ProtocolError = 7,
}

/// The body of an `Exception` reply envelope.
///
/// Unlike schema-declared error structs, which are produced by generated
/// code, this shape belongs to the protocol runtime itself: any peer may
/// answer any call with it. The body is a two-field struct (field 1: the
/// message string, field 2: the kind code) followed by a field-stop, encoded
/// in whichever protocol the envelope used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFault {
    pub kind: RemoteFaultKind,
    pub message: String,
}

impl RemoteFault {
    pub fn new(kind: RemoteFaultKind, message: impl Into<String>) -> Self {
        RemoteFault {
            kind,
            message: message.into(),
        }
    }

    /// Serializes the fault body under `protocol`.
    pub fn encode(&self, protocol: ProtocolKind) -> Vec<u8> {
        match protocol {
            ProtocolKind::Binary => {
                let mut buf = Vec::with_capacity(12 + self.message.len());
                buf.push(BINARY_FIELD_TYPE_STRING);
                buf.extend(&1i16.to_be_bytes());
                buf.extend(&(self.message.len() as i32).to_be_bytes());
                buf.extend(self.message.as_bytes());
                buf.push(BINARY_FIELD_TYPE_I32);
                buf.extend(&2i16.to_be_bytes());
                buf.extend(&i32::from(self.kind).to_be_bytes());
                buf.push(FIELD_TYPE_STOP);
                buf
            }
            ProtocolKind::Compact => {
                let mut buf = Vec::with_capacity(6 + self.message.len());
                // Short-form field headers: the id delta in the high nibble,
                // the type in the low nibble. Both deltas here are 1.
                buf.push((1 << 4) | COMPACT_FIELD_TYPE_BINARY);
                write_varint32(&mut buf, self.message.len() as u32);
                buf.extend(self.message.as_bytes());
                buf.push((1 << 4) | COMPACT_FIELD_TYPE_I32);
                write_varint32(&mut buf, zigzag_encode_i32(i32::from(self.kind)));
                buf.push(FIELD_TYPE_STOP);
                buf
            }
        }
    }

    /// Decodes a fault body under `protocol`.
    ///
    /// Unknown fields of a known type are skipped so that a peer carrying
    /// extra fields still decodes; an unrecognized field type fails with
    /// [`EnvelopeError::InvalidFieldEncoding`].
    pub fn decode(body: &[u8], protocol: ProtocolKind) -> Result<Self, EnvelopeError> {
        match protocol {
            ProtocolKind::Binary => decode_binary_fault(body),
            ProtocolKind::Compact => decode_compact_fault(body),
        }
    }
}

impl fmt::Display for RemoteFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RemoteFault {}

fn take<'a>(body: &'a [u8], pos: usize, len: usize) -> Result<&'a [u8], EnvelopeError> {
    let end = pos.checked_add(len).ok_or(EnvelopeError::TruncatedHeader)?;
    body.get(pos..end).ok_or(EnvelopeError::TruncatedHeader)
}

fn decode_binary_fault(body: &[u8]) -> Result<RemoteFault, EnvelopeError> {
    let mut message = String::new();
    let mut kind = RemoteFaultKind::Unknown;
    let mut pos = 0;

    loop {
        let field_type = *body.get(pos).ok_or(EnvelopeError::TruncatedHeader)?;
        pos += 1;
        if field_type == FIELD_TYPE_STOP {
            break;
        }
        let field_id = i16::from_be_bytes(take(body, pos, 2)?.try_into().unwrap_or([0; 2]));
        pos += 2;

        match field_type {
            BINARY_FIELD_TYPE_STRING => {
                let len = i32::from_be_bytes(take(body, pos, 4)?.try_into().unwrap_or([0; 4]));
                pos += 4;
                if len < 0 {
                    return Err(EnvelopeError::InvalidFieldEncoding);
                }
                let bytes = take(body, pos, len as usize)?;
                pos += len as usize;
                if field_id == 1 {
                    message = std::str::from_utf8(bytes)
                        .map_err(|_| EnvelopeError::InvalidFieldEncoding)?
                        .to_string();
                } else {
                    tracing::warn!(field_id, "skipping unrecognized string field in fault body");
                }
            }
            BINARY_FIELD_TYPE_I32 => {
                let value = i32::from_be_bytes(take(body, pos, 4)?.try_into().unwrap_or([0; 4]));
                pos += 4;
                if field_id == 2 {
                    kind = RemoteFaultKind::try_from(value).unwrap_or(RemoteFaultKind::Unknown);
                } else {
                    tracing::warn!(field_id, "skipping unrecognized i32 field in fault body");
                }
            }
            _ => return Err(EnvelopeError::InvalidFieldEncoding),
        }
    }

    Ok(RemoteFault { kind, message })
}

fn decode_compact_fault(body: &[u8]) -> Result<RemoteFault, EnvelopeError> {
    let mut message = String::new();
    let mut kind = RemoteFaultKind::Unknown;
    let mut pos = 0;
    let mut last_field_id: i32 = 0;

    loop {
        let header = *body.get(pos).ok_or(EnvelopeError::TruncatedHeader)?;
        pos += 1;
        if header == FIELD_TYPE_STOP {
            break;
        }
        let delta = i32::from(header >> 4);
        let field_type = header & 0x0f;
        let field_id = if delta == 0 {
            // Long form: the field id follows as a zig-zag varint.
            let (raw, next) = read_varint32(body, pos)?;
            pos = next;
            zigzag_decode_i32(raw)
        } else {
            last_field_id + delta
        };
        last_field_id = field_id;

        match field_type {
            COMPACT_FIELD_TYPE_BINARY => {
                let (len, next) = read_varint32(body, pos)?;
                pos = next;
                let bytes = take(body, pos, len as usize)?;
                pos += len as usize;
                if field_id == 1 {
                    message = std::str::from_utf8(bytes)
                        .map_err(|_| EnvelopeError::InvalidFieldEncoding)?
                        .to_string();
                } else {
                    tracing::warn!(field_id, "skipping unrecognized string field in fault body");
                }
            }
            COMPACT_FIELD_TYPE_I32 => {
                let (raw, next) = read_varint32(body, pos)?;
                pos = next;
                let value = zigzag_decode_i32(raw);
                if field_id == 2 {
                    kind = RemoteFaultKind::try_from(value).unwrap_or(RemoteFaultKind::Unknown);
                } else {
                    tracing::warn!(field_id, "skipping unrecognized i32 field in fault body");
                }
            }
            _ => return Err(EnvelopeError::InvalidFieldEncoding),
        }
    }

    Ok(RemoteFault { kind, message })
}
