use std::fmt;

use thiserror::Error;

/// Error type for JWT operations.
///
/// Display strings are safe to return to callers; the carried detail is for
/// logs only.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Invalid token format")]
    Malformed(String),

    #[error("Invalid token algorithm")]
    WrongAlgorithm(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private"),
            KeyKind::Public => f.write_str("public"),
        }
    }
}

/// Error type for loading the signing key pair. Fatal at startup.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("can't read {kind} key from {path}: {reason}")]
    Unreadable {
        kind: KeyKind,
        path: String,
        reason: String,
    },

    #[error("can't decode {0} key: {1}")]
    Encoding(KeyKind, String),

    #[error("can't parse {0} key: {1}")]
    Parse(KeyKind, String),

    #[error("key pair mismatch: {0}")]
    Mismatch(String),
}
