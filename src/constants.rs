// Binary-protocol message header constants.

/// Strict binary-protocol version word (version 1). Occupies the upper half
/// of the first 32-bit word of the header; the sign bit doubles as the
/// "versioned message" marker.
pub const BINARY_VERSION_1: u32 = 0x8001_0000;

/// Mask isolating the version bits of the binary version word.
pub const BINARY_VERSION_MASK: u32 = 0xffff_0000;

/// Mask isolating the message-type byte of the binary version word.
pub const BINARY_TYPE_MASK: u32 = 0x0000_00ff;

// Compact-protocol message header constants.

/// Compact-protocol identifier, always the first byte on the wire.
pub const COMPACT_PROTOCOL_ID: u8 = 0x82;

/// Compact-protocol version carried in the low five bits of the second byte.
pub const COMPACT_VERSION: u8 = 1;

/// Mask isolating the version bits of the compact version/type byte.
pub const COMPACT_VERSION_MASK: u8 = 0x1f;

/// Right shift that moves the message-type bits of the compact version/type
/// byte into place.
pub const COMPACT_TYPE_SHIFT: u8 = 5;

/// Mask applied after [`COMPACT_TYPE_SHIFT`].
pub const COMPACT_TYPE_BITS: u8 = 0x07;

// Transport framing.

/// Size in bytes of the framed-transport length prefix (big-endian u32).
pub const FRAME_PREFIX_SIZE: usize = 4;

// Field-type codes used by the remote-fault body codec. Only the two types
// that appear in a fault body are needed here; full struct codecs belong to
// generated code.

/// Binary-protocol field-type code for a 32-bit integer.
pub const BINARY_FIELD_TYPE_I32: u8 = 8;

/// Binary-protocol field-type code for a length-prefixed string.
pub const BINARY_FIELD_TYPE_STRING: u8 = 11;

/// Compact-protocol field-type code for a zig-zag varint 32-bit integer.
pub const COMPACT_FIELD_TYPE_I32: u8 = 0x05;

/// Compact-protocol field-type code for a varint-length-prefixed string.
pub const COMPACT_FIELD_TYPE_BINARY: u8 = 0x08;

/// Field-stop marker terminating a struct body in both protocols.
pub const FIELD_TYPE_STOP: u8 = 0;
