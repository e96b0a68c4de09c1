use serde::Serialize;

use crate::domain::user::models::UserSession;

pub mod login;
pub mod me;
pub mod register;

pub use login::login;
pub use me::me;
pub use register::register;

/// Payload returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub access_token: String,
}

impl From<&UserSession> for SessionResponseData {
    fn from(session: &UserSession) -> Self {
        Self {
            email: session.user.email.as_str().to_string(),
            first_name: session.user.first_name.as_str().to_string(),
            last_name: session.user.last_name.as_str().to_string(),
            access_token: session.access_token.clone(),
        }
    }
}
