pub mod credentials;
pub mod errors;

pub use credentials::BasicCredentials;
pub use credentials::StaticCredential;
pub use errors::BasicAuthError;
