use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::TokenClaims;
use super::errors::JwtError;
use super::keys::KeyMaterial;
use crate::identity::AuthenticatedIdentity;

pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Algorithms a token may declare. Anything else, including `none` and the
/// HMAC family, is rejected before signature verification.
const ACCEPTED_ALGORITHMS: &[&str] = &["RS256", "RS384", "RS512"];

const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// JWT token handler for signing and verifying bearer tokens.
///
/// Tokens are signed with RS256. Audience and issuer are both the application
/// identifier.
#[derive(Debug, Clone)]
pub struct JwtHandler {
    keys: KeyMaterial,
    application: String,
    lifetime: Duration,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `keys` - RSA key material
    /// * `application` - Application identifier used as audience and issuer
    pub fn new(keys: KeyMaterial, application: impl Into<String>) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = vec![Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
        // Time, audience and issuer checks run against the typed claims.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            keys,
            application: application.into(),
            lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
            validation,
        }
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a subject, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - No private key is loaded or signing failed
    pub fn sign(&self, subject_id: &str, display_name: &str) -> Result<String, JwtError> {
        self.sign_at(subject_id, display_name, Utc::now())
    }

    pub fn sign_at(
        &self,
        subject_id: &str,
        display_name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = TokenClaims::for_subject(
            subject_id,
            display_name,
            &self.application,
            issued_at,
            self.lifetime,
        )?;

        self.encode(&claims)
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `SigningFailed` - No private key is loaded or signing failed
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        let encoding_key = self
            .keys
            .encoding_key()
            .ok_or_else(|| JwtError::SigningFailed("private key is not loaded".to_string()))?;

        encode(&Header::new(SIGNING_ALGORITHM), claims, encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return the caller identity it proves.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, bad encoding, or claims don't fit the schema
    /// * `WrongAlgorithm` - Header declares an algorithm outside the RSA family
    /// * `InvalidSignature` - Signature doesn't verify under the public key
    /// * `Expired` - Current time is at or after `exp`
    /// * `NotYetValid` - Current time is before `iat` or `nbf`
    /// * `InvalidClaims` - Audience or issuer is not this application
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, JwtError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, JwtError> {
        self.decode_at(token, now).map(|claims| claims.identity())
    }

    /// Verify a token and return its full claim set.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let algorithm = declared_algorithm(token)?;
        if !ACCEPTED_ALGORITHMS.contains(&algorithm.as_str()) {
            return Err(JwtError::WrongAlgorithm(algorithm));
        }

        let token_data = decode::<TokenClaims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(classify)?;

        self.check_claims(&token_data.claims, now.timestamp())?;
        Ok(token_data.claims)
    }

    fn check_claims(&self, claims: &TokenClaims, now: i64) -> Result<(), JwtError> {
        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }
        if claims.is_premature(now) {
            return Err(JwtError::NotYetValid);
        }
        if claims.aud != self.application {
            return Err(JwtError::InvalidClaims(format!(
                "unexpected audience {}",
                claims.aud
            )));
        }
        if claims.iss != self.application {
            return Err(JwtError::InvalidClaims(format!(
                "unexpected issuer {}",
                claims.iss
            )));
        }

        Ok(())
    }
}

fn declared_algorithm(token: &str) -> Result<String, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, _, _] = segments.as_slice() else {
        return Err(JwtError::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::Malformed(e.to_string()))?;
    let header: RawHeader =
        serde_json::from_slice(&header).map_err(|e| JwtError::Malformed(e.to_string()))?;

    Ok(header.alg)
}

fn classify(error: jsonwebtoken::errors::Error) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => JwtError::WrongAlgorithm(error.to_string()),
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::ImmatureSignature => JwtError::NotYetValid,
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
            JwtError::InvalidClaims(error.to_string())
        }
        _ => JwtError::Malformed(error.to_string()),
    }
}
