use auth::AuthenticatedIdentity;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;

/// Caller resolved by the bearer gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub display_name: String,
}

impl CurrentUser {
    fn from_identity(identity: &AuthenticatedIdentity) -> Result<Self, ApiError> {
        let id = UserId::from_subject(&identity.subject_id).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a user id");
            ApiError::Unauthorized("Invalid token subject".to_string())
        })?;

        Ok(Self {
            id,
            display_name: identity.display_name.clone(),
        })
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .ok_or_else(|| {
                tracing::error!("Route reached without an authenticated identity");
                ApiError::InternalServerError("Can't get user from token".to_string())
            })?;

        Self::from_identity(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(subject_id: &str) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            subject_id: subject_id.to_string(),
            display_name: "fahmi".to_string(),
        }
    }

    #[test]
    fn test_numeric_subject() {
        assert_eq!(
            CurrentUser::from_identity(&identity("1")),
            Ok(CurrentUser {
                id: UserId(1),
                display_name: "fahmi".to_string(),
            })
        );
    }

    #[test]
    fn test_non_numeric_subject() {
        assert_eq!(
            CurrentUser::from_identity(&identity("fahmi")),
            Err(ApiError::Unauthorized("Invalid token subject".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_identity() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;

        assert_eq!(
            result,
            Err(ApiError::InternalServerError(
                "Can't get user from token".to_string()
            ))
        );
    }
}
