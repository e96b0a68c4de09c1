use crate::basic::BasicAuthError;
use crate::basic::BasicCredentials;
use crate::basic::StaticCredential;
use crate::identity::AuthenticatedIdentity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification, token issuance
/// and the static credential gate.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    static_credential: StaticCredential,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_handler` - Token signer/verifier
    /// * `static_credential` - Username/password pair for the basic gate
    pub fn new(jwt_handler: JwtHandler, static_credential: StaticCredential) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            static_credential,
        }
    }

    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Application identifier, used as token audience/issuer and as the
    /// authentication realm.
    ///
    /// # Returns
    /// Application identifier configured on the token handler
    pub fn application(&self) -> &str {
        self.jwt_handler.application()
    }

    /// Hash a password for storage.
    ///
    /// # Returns
    /// Modular crypt hash string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing failed or password exceeds 72 bytes
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Returns
    /// True if password matches
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify a password and issue a token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject_id` - Identifier placed in the token
    /// * `display_name` - Display name placed in the token
    ///
    /// # Returns
    /// Access token for the subject
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: &str,
        display_name: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.sign(subject_id, display_name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject_id: &str, display_name: &str) -> Result<String, JwtError> {
        self.jwt_handler.sign(subject_id, display_name)
    }

    /// Validate a bearer token.
    ///
    /// # Returns
    /// Identity carried by the token
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, expired or meant for another application
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedIdentity, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Decode a `Basic` header payload and check it against the static credential.
    ///
    /// # Returns
    /// Decoded credentials
    ///
    /// # Errors
    /// * `Encoding` - Payload is not base64
    /// * `Malformed` - Payload is not `username:password`
    /// * `InvalidCredentials` - Credentials differ from the configured pair
    pub fn check_basic(&self, encoded: &str) -> Result<BasicCredentials, BasicAuthError> {
        let credentials = BasicCredentials::decode(encoded)?;
        self.static_credential.verify(&credentials)?;
        Ok(credentials)
    }
}
