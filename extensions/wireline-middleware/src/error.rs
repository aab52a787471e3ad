use std::fmt;
use wireline::envelope::EnvelopeError;

/// Failure of a pipeline run. Nothing here is retried; the error resolves
/// the call it belongs to.
#[derive(Debug)]
pub enum MiddlewareError {
    /// A registered handler rejected the call. The message is the handler's
    /// own error text, verbatim.
    Rejected { message: String },

    /// Method-name resolution failed on the buffer under inspection.
    Envelope(EnvelopeError),
}

impl fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareError::Rejected { message } => write!(f, "{message}"),
            MiddlewareError::Envelope(err) => {
                write!(f, "unable to resolve method for filtering: {err}")
            }
        }
    }
}

impl std::error::Error for MiddlewareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MiddlewareError::Envelope(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for MiddlewareError {
    fn from(err: EnvelopeError) -> Self {
        MiddlewareError::Envelope(err)
    }
}
