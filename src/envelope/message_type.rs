use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Call kind carried in a message envelope.
///
/// The numeric values are part of the wire contract: binary protocol stores
/// them in the low byte of the version word, compact protocol in the top
/// three bits of its version/type byte.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum MessageType {
    /// A request expecting a reply.
    Call = 1,
    /// A successful result for an earlier call.
    Reply = 2,
    /// A protocol-level exception result for an earlier call.
    Exception = 3,
    /// A fire-and-forget request; no reply follows.
    OneWay = 4,
}
