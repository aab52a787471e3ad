use std::fmt;

/// Failures raised while assembling a service endpoint.
#[derive(Debug)]
pub enum EndpointError {
    /// A handler is already registered under this method name.
    DuplicateHandler(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::DuplicateHandler(method) => {
                write!(f, "a handler for method {method:?} is already registered")
            }
        }
    }
}

impl std::error::Error for EndpointError {}
