pub mod claims;
pub mod errors;
pub mod handler;
pub mod keys;

pub use claims::TokenClaims;
pub use errors::JwtError;
pub use errors::KeyError;
pub use errors::KeyKind;
pub use handler::JwtHandler;
pub use handler::DEFAULT_TOKEN_LIFETIME_HOURS;
pub use keys::KeyMaterial;
pub use keys::KeySource;
