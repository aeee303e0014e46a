use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("parse: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("validation: {0}")]
    Validation(String),

    #[error("authentication: {0}")]
    Authentication(String),

    #[error("transaction lookup: {message}")]
    Resolution { message: String, retryable: bool },

    #[error("queue publish: {message}")]
    Dispatch { message: String, retryable: bool },

    #[error("config: {0}")]
    Config(String),
}

impl PipelineError {
    /// Network failures, timeouts and upstream 5xx/429 are worth another
    /// attempt. Everything else is terminal for the call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Resolution { retryable, .. } | Self::Dispatch { retryable, .. } => *retryable,
            _ => false,
        }
    }
}
