use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn create_user(&self, command: RegisterCommand, role: Role) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        if self.repository.exists_by_email(&command.email).await? {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        self.repository
            .create(NewUser {
                email: command.email,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
                role,
            })
            .await
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))?
            .map_err(|e| UserError::Password(e.to_string()))
    }

    fn open_session(&self, user: User) -> Result<UserSession, UserError> {
        let access_token = self
            .authenticator
            .generate_token(&user.id.to_string(), user.first_name.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(UserSession { user, access_token })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserSession, UserError> {
        let user = self.create_user(command, Role::Contributor).await?;
        tracing::info!(user_id = %user.id, "User registered");

        self.open_session(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject_id = user.id.to_string();
        let display_name = user.first_name.as_str().to_string();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&command.password, &stored_hash, &subject_id, &display_name)
        })
        .await
        .map_err(|e| UserError::Unknown(e.to_string()))?;

        match result {
            Ok(authenticated) => Ok(UserSession {
                user,
                access_token: authenticated.access_token,
            }),
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::Password(e.to_string())),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e.to_string())),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn ensure_admin(&self, command: RegisterCommand) -> Result<Option<User>, UserError> {
        if self.repository.count().await? > 0 {
            return Ok(None);
        }

        let admin = self.create_user(command, Role::Admin).await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "Admin user seeded");

        Ok(Some(admin))
    }
}
