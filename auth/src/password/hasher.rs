use bcrypt::Version;

use super::errors::PasswordError;

/// Work factor applied to every stored password.
pub const DEFAULT_COST: u32 = 14;

/// bcrypt only reads this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Provides salted one-way password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher using [`DEFAULT_COST`].
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// bcrypt accepts costs between 4 and 31; anything else fails at hash time.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Generates a random salt on every call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2a$<cost>$<salt><hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password longer than [`MAX_PASSWORD_BYTES`], or the
    ///   primitive rejected the cost
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::HashingFailed(format!(
                "password is {} bytes, maximum is {MAX_PASSWORD_BYTES}",
                password.len()
            )));
        }

        bcrypt::hash_with_result(password.as_bytes(), self.cost)
            .map(|parts| parts.format_for_version(Version::TwoA))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is a normal negative result. A stored hash that cannot be
    /// parsed is logged and treated as a mismatch. Passwords longer than
    /// [`MAX_PASSWORD_BYTES`] never match, since no hash could have been made
    /// from them.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        match bcrypt::verify(password.as_bytes(), hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid bcrypt hash");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Produced by an earlier deployment at cost 14.
    const LEGACY_HASH: &str = "$2a$14$FwEMlETO/XHoB90v/O9zK.KNfm.G5ZxJUcoZWS5IFBOM/Ao4adKiW";

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(4);
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_carries_default_cost_marker() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("fahmi").expect("Failed to hash password");

        assert!(hash.starts_with("$2a$14$"));
        assert!(hasher.verify("fahmi", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::with_cost(4);

        let first = hasher.hash("same").expect("Failed to hash password");
        let second = hasher.hash("same").expect("Failed to hash password");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_legacy_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("fahmi", LEGACY_HASH));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("password", "invalid_hash"));
    }

    #[test]
    fn test_hash_rejects_password_over_limit() {
        let hasher = PasswordHasher::with_cost(4);
        let password = format!("{}X", "A".repeat(MAX_PASSWORD_BYTES));

        assert!(matches!(
            hasher.hash(&password),
            Err(PasswordError::HashingFailed(_))
        ));
    }

    #[test]
    fn test_hash_accepts_password_at_limit() {
        let hasher = PasswordHasher::with_cost(4);
        let password = "A".repeat(MAX_PASSWORD_BYTES);

        let hash = hasher.hash(&password).expect("Failed to hash password");

        assert!(hasher.verify(&password, &hash));
    }

    #[test]
    fn test_verify_rejects_password_sharing_prefix() {
        let hasher = PasswordHasher::with_cost(4);
        let hash = hasher
            .hash(&"A".repeat(MAX_PASSWORD_BYTES))
            .expect("Failed to hash password");

        let longer = format!("{}Y", "A".repeat(MAX_PASSWORD_BYTES));
        assert!(!hasher.verify(&longer, &hash));
    }

    #[test]
    fn test_hash_rejects_out_of_range_cost() {
        let hasher = PasswordHasher::with_cost(2);
        assert!(matches!(
            hasher.hash("password"),
            Err(PasswordError::HashingFailed(_))
        ));
    }
}
