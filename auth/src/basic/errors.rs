use thiserror::Error;

/// Error type for basic credential checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BasicAuthError {
    /// Payload is not valid base64; carries the decoder message.
    #[error("{0}")]
    Encoding(String),

    #[error("Malformed basic credentials")]
    Malformed,

    #[error("Invalid credentials")]
    InvalidCredentials,
}
