use std::fmt;
use std::io;
use wireline::envelope::{EnvelopeError, RemoteFault};
use wireline_middleware::MiddlewareError;

/// Everything a call through an [`crate::RpcClient`] can fail with.
///
/// Callers branch on these variants, and on the exact `status_code` and
/// message text they carry, so the mapping is part of the client's
/// contract. Nothing here is retried by the client; retries belong to a
/// layer above it.
#[derive(Debug)]
pub enum ClientError {
    /// A message envelope could not be decoded.
    Envelope(EnvelopeError),

    /// A registered middleware handler rejected the call. The display text
    /// is the handler's own error message, verbatim.
    Middleware { message: String },

    /// The transport answered with a non-success HTTP status, preserved
    /// exactly.
    Transport { status_code: u16 },

    /// The request never produced a response: resolver or connection
    /// failure. The message names the failing endpoint.
    Network { message: String },

    /// The per-call deadline elapsed before a response arrived.
    Timeout,

    /// A well-formed reply carrying a service-declared error. The expected
    /// path for declared failures, distinct from every transport-level
    /// variant above.
    Remote(RemoteFault),

    /// Argument or result (de)serialization failed in the method codec.
    Codec(io::Error),
}

impl ClientError {
    /// The HTTP status for transport-level failures, `None` otherwise.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Envelope(err) => write!(f, "envelope decode failed: {err}"),
            ClientError::Middleware { message } => write!(f, "{message}"),
            ClientError::Transport { status_code } => {
                write!(f, "HTTP response with status code {status_code}")
            }
            ClientError::Network { message } => write!(f, "{message}"),
            ClientError::Timeout => write!(f, "request timed out"),
            ClientError::Remote(fault) => write!(f, "{fault}"),
            ClientError::Codec(err) => write!(f, "codec failure: {err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Envelope(err) => Some(err),
            ClientError::Remote(fault) => Some(fault),
            ClientError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Codec(err)
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        ClientError::Envelope(err)
    }
}

impl From<MiddlewareError> for ClientError {
    fn from(err: MiddlewareError) -> Self {
        match err {
            MiddlewareError::Rejected { message } => ClientError::Middleware { message },
            MiddlewareError::Envelope(err) => ClientError::Envelope(err),
        }
    }
}
