use std::fmt;

/// Failures raised while decoding a message envelope or a protocol-level
/// struct body the core owns (the remote-fault codec).
///
/// All of these are fatal for the call under inspection; nothing in this
/// layer retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Buffer ended before the full header (or an announced field) was read.
    TruncatedHeader,

    /// A binary-protocol message arrived without the strict version word.
    MissingVersionHeader,

    /// The version bits of the header do not match the supported version.
    UnsupportedProtocolVersion,

    /// The compact protocol-id byte was something else entirely.
    UnknownProtocolId(u8),

    /// The message-type bits decode to no known call kind.
    UnknownMessageType(u8),

    /// The envelope decoded cleanly but its call kind is not valid at this
    /// point in the exchange (e.g. a `Call` where a reply was expected).
    UnexpectedMessageType(u8),

    /// The method name had a negative length or was not valid UTF-8.
    InvalidMethodName,

    /// A varint ran past its maximum width or past the buffer.
    MalformedVarint,

    /// A struct body the core must decode had an unexpected field layout.
    InvalidFieldEncoding,
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::TruncatedHeader => write!(f, "message header is truncated"),
            EnvelopeError::MissingVersionHeader => {
                write!(f, "binary message is missing the protocol version header")
            }
            EnvelopeError::UnsupportedProtocolVersion => {
                write!(f, "unsupported protocol version in message header")
            }
            EnvelopeError::UnknownProtocolId(id) => {
                write!(f, "unknown compact protocol id: {id:#04x}")
            }
            EnvelopeError::UnknownMessageType(value) => {
                write!(f, "unknown message type: {value}")
            }
            EnvelopeError::UnexpectedMessageType(value) => {
                write!(f, "unexpected message type: {value}")
            }
            EnvelopeError::InvalidMethodName => write!(f, "invalid method name in header"),
            EnvelopeError::MalformedVarint => write!(f, "malformed varint in header"),
            EnvelopeError::InvalidFieldEncoding => {
                write!(f, "unexpected field encoding in protocol struct")
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}
