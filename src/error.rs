use thiserror::Error;

/// Errors that can occur while generating hooks
#[derive(Error, Debug)]
pub enum HookError {
    /// The request is missing a required field
    #[error("{0}")]
    Validation(String),

    /// The model backend failed to produce a completion
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model answered with something that is not a usable hooks payload
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Binding or serving the HTTP listener failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, HookError::Validation(_))
    }
}
