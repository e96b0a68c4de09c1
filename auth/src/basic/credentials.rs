use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::BasicAuthError;
use crate::compare::constant_time_eq;

/// Username and password presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode the payload of a `Basic` authorization header.
    ///
    /// # Arguments
    /// * `encoded` - `base64(username:password)`, scheme already stripped
    ///
    /// # Errors
    /// * `Encoding` - Payload is not standard base64
    /// * `Malformed` - Payload is not UTF-8 or does not split into exactly two
    ///   `:`-separated parts
    pub fn decode(encoded: &str) -> Result<Self, BasicAuthError> {
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|e| BasicAuthError::Encoding(e.to_string()))?;
        let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Malformed)?;

        let parts: Vec<&str> = decoded.split(':').collect();
        match parts.as_slice() {
            [username, password] => Ok(Self {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(BasicAuthError::Malformed),
        }
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Process-wide username/password pair guarding the public endpoints.
#[derive(Clone)]
pub struct StaticCredential {
    username: String,
    password: String,
}

impl StaticCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check presented credentials against the configured pair.
    ///
    /// Both fields are always compared so a wrong username costs the same as a
    /// wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Username or password differs
    pub fn verify(&self, credentials: &BasicCredentials) -> Result<(), BasicAuthError> {
        let username_matches = constant_time_eq(&credentials.username, &self.username);
        let password_matches = constant_time_eq(&credentials.password, &self.password);

        if username_matches & password_matches {
            Ok(())
        } else {
            Err(BasicAuthError::InvalidCredentials)
        }
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
