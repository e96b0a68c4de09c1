use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::NameError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a token subject.
    ///
    /// # Errors
    /// * `InvalidFormat` - Subject is not a positive integer
    pub fn from_subject(subject: &str) -> Result<Self, UserIdError> {
        match subject.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(UserIdError::InvalidFormat(subject.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name. Trimmed, non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Contributor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Contributor => "CONTRIBUTOR",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CONTRIBUTOR" => Ok(Role::Contributor),
            other => Err(RoleError(other.to_string())),
        }
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `first_name` - Validated first name
    /// * `last_name` - Validated last name
    pub fn new(
        email: EmailAddress,
        password: String,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
        }
    }
}

/// Command to log in. The email is matched verbatim and never validated, so a
/// malformed address is indistinguishable from an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// User row to be inserted; storage assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub role: Role,
}

/// Authenticated user together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user: User,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_subject() {
        assert_eq!(UserId::from_subject("42"), Ok(UserId(42)));
        assert!(UserId::from_subject("0").is_err());
        assert!(UserId::from_subject("-1").is_err());
        assert!(UserId::from_subject("abc").is_err());
        assert!(UserId::from_subject("").is_err());
    }

    #[test]
    fn test_email_address() {
        assert!(EmailAddress::new("fahmi@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_person_name_is_trimmed() {
        let name = PersonName::new("  Fahmi ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Fahmi");
    }

    #[test]
    fn test_person_name_empty() {
        assert_eq!(PersonName::new("   ".to_string()), Err(NameError::Empty));
    }

    #[test]
    fn test_person_name_too_long() {
        let result = PersonName::new("a".repeat(256));
        assert_eq!(
            result,
            Err(NameError::TooLong {
                max: 255,
                actual: 256
            })
        );
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Contributor] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("OWNER".parse::<Role>().is_err());
    }
}
