use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new contributor and issue an access token.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserSession, UserError>;

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Create an admin from `command` when no user exists yet.
    ///
    /// # Returns
    /// The created admin, or `None` when users already exist
    async fn ensure_admin(&self, command: RegisterCommand) -> Result<Option<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;

    async fn count(&self) -> Result<i64, UserError>;
}
