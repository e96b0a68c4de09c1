//! Authentication utilities library
//!
//! Provides the authentication primitives the HTTP service is built on:
//! - Password hashing (bcrypt)
//! - RS256 JWT issuance and verification
//! - Static credential check for the `Basic` gate
//! - Constant-time string comparison
//!
//! The service adapts these to its own extractors and middleware.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Basic Credentials
//! ```
//! use auth::{BasicCredentials, StaticCredential};
//!
//! let credentials = BasicCredentials::decode("dXNlcjpwYXNzd29yZA==").unwrap();
//! let expected = StaticCredential::new("user", "password");
//! assert!(expected.verify(&credentials).is_ok());
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use auth::{Authenticator, JwtHandler, KeyMaterial, KeySource, StaticCredential};
//!
//! let keys = KeyMaterial::load(
//!     &KeySource::File("keys/private.pem".into()),
//!     &KeySource::File("keys/public.pem".into()),
//! )?;
//! let auth = Authenticator::new(
//!     JwtHandler::new(keys, "DEVORIA"),
//!     StaticCredential::new("user", "password"),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123")?;
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "1", "fahmi")?;
//!
//! // Validate token
//! let identity = auth.validate_token(&result.access_token)?;
//! assert_eq!(identity.subject_id, "1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod authenticator;
pub mod basic;
pub mod compare;
pub mod identity;
pub mod jwt;
pub mod password;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use basic::BasicAuthError;
pub use basic::BasicCredentials;
pub use basic::StaticCredential;
pub use compare::constant_time_eq;
pub use identity::AuthenticatedIdentity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::KeyError;
pub use jwt::KeyMaterial;
pub use jwt::KeySource;
pub use jwt::TokenClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
