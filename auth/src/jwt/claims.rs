use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::identity::AuthenticatedIdentity;

/// Claim set carried by every bearer token.
///
/// Decoding is schema-checked: a token missing a required claim, or carrying
/// one with the wrong type, fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Audience (application identifier)
    pub aud: String,

    /// Issuer (application identifier)
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Subject identifier
    pub jti: String,

    /// Subject display name
    pub username: String,
}

impl TokenClaims {
    /// Create claims for a subject.
    ///
    /// # Arguments
    /// * `subject_id` - Unique subject identifier (stored in `jti`)
    /// * `display_name` - Display name (stored in `username`)
    /// * `application` - Audience and issuer
    /// * `issued_at` - Issue instant
    /// * `lifetime` - Time until the token expires
    ///
    /// # Errors
    /// * `SigningFailed` - Expiration falls outside the representable range
    pub fn for_subject(
        subject_id: impl ToString,
        display_name: impl Into<String>,
        application: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::SigningFailed(format!("token lifetime {lifetime} overflows expiration"))
        })?;

        Ok(Self {
            aud: application.to_string(),
            iss: application.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            nbf: None,
            jti: subject_id.to_string(),
            username: display_name.into(),
        })
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// A token is usable strictly before its expiration instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if the token is used before it was issued or before `nbf`.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat || self.nbf.map_or(false, |nbf| current_timestamp < nbf)
    }

    /// Project the claims into the identity handed to request handlers.
    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            subject_id: self.jti.clone(),
            display_name: self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn claims() -> TokenClaims {
        let issued_at = Utc.timestamp_opt(1_000_000, 0).unwrap();
        TokenClaims::for_subject("1", "fahmi", "DEVORIA", issued_at, Duration::hours(24))
            .unwrap()
    }

    #[test]
    fn test_for_subject() {
        let claims = claims();

        assert_eq!(claims.jti, "1");
        assert_eq!(claims.username, "fahmi");
        assert_eq!(claims.aud, "DEVORIA");
        assert_eq!(claims.iss, "DEVORIA");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(claims.nbf.is_none());
    }

    #[test]
    fn test_for_subject_rejects_overflowing_lifetime() {
        let issued_at = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let lifetime = Duration::days(1_000_000_000);

        let result = TokenClaims::for_subject("1", "fahmi", "DEVORIA", issued_at, lifetime);

        assert!(matches!(result, Err(JwtError::SigningFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let claims = claims();

        assert!(!claims.is_expired(claims.exp - 1));
        assert!(claims.is_expired(claims.exp)); // Exactly at expiration
        assert!(claims.is_expired(claims.exp + 1));
    }

    #[test]
    fn test_is_premature() {
        let claims = claims().with_not_before(1_000_100);

        assert!(claims.is_premature(999_999));
        assert!(claims.is_premature(1_000_050));
        assert!(!claims.is_premature(1_000_100));
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(claims()).unwrap();

        for name in ["aud", "iss", "iat", "exp", "jti", "username"] {
            assert!(value.get(name).is_some(), "missing {name}");
        }
        assert!(value.get("nbf").is_none());
    }

    #[test]
    fn test_decode_rejects_missing_claim() {
        let value = serde_json::json!({
            "aud": "DEVORIA",
            "iss": "DEVORIA",
            "iat": 1,
            "exp": 2,
            "jti": "1"
        });

        assert!(serde_json::from_value::<TokenClaims>(value).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_claim_type() {
        let value = serde_json::json!({
            "aud": "DEVORIA",
            "iss": "DEVORIA",
            "iat": 1,
            "exp": 2,
            "jti": 1,
            "username": "fahmi"
        });

        assert!(serde_json::from_value::<TokenClaims>(value).is_err());
    }

    #[test]
    fn test_identity() {
        let identity = claims().identity();

        assert_eq!(identity.subject_id, "1");
        assert_eq!(identity.display_name, "fahmi");
    }
}
