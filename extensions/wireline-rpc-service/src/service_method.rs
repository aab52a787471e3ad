use std::io;

/// The codec boundary between this transport layer and generated code.
///
/// A schema compiler (or a hand-written stand-in, as in the example
/// service-definition crate) produces one implementation per service
/// method. The transport layer never serializes argument or result structs
/// itself; it only moves the opaque bodies these codecs produce and wraps
/// them in message envelopes.
pub trait ServiceMethod {
    /// Wire name of the method, exactly as written into the message
    /// envelope. Middleware method filters match against this string.
    const NAME: &'static str;

    /// The high-level argument type accepted by the request encoder.
    type Args;

    /// The high-level result type produced by the response decoder.
    type Ret;

    /// Encodes the arguments into an opaque body buffer.
    fn encode_args(args: Self::Args) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw argument bytes back into the typed arguments.
    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error>;

    /// Encodes the result value into an opaque body buffer.
    fn encode_ret(ret: Self::Ret) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw result bytes back into the typed result.
    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error>;
}
