use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::article::errors::ArticleError;
use crate::domain::user::errors::UserError;

pub mod articles;
pub mod user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure responses. Every variant renders as `{"message": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    /// Request could not be parsed or failed validation; carries the detail
    /// returned as `data`.
    Validation(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(detail) => {
                ApiResponseBody::new("Validation failed", serde_json::Value::String(detail))
            }
            ApiError::InternalServerError(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message) => {
                ApiResponseBody::new(message, serde_json::Value::Null)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("User already registered".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidName(_)
            | UserError::EmptyPassword => ApiError::Validation(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(_) => ApiError::NotFound("Article not found".to_string()),
            ArticleError::Forbidden(_) => ApiError::Forbidden("Access denied".to_string()),
            ArticleError::RequesterNotFound(_) => {
                ApiError::Unauthorized("User not found".to_string())
            }
            ArticleError::SlugAlreadyExists(_) => {
                ApiError::Conflict("Slug already exists".to_string())
            }
            ArticleError::InvalidTitle(_)
            | ArticleError::InvalidSlug(_)
            | ArticleError::EmptyContent => ApiError::Validation(err.to_string()),
            ArticleError::DatabaseError(_) => {
                tracing::error!(error = %err, "Article operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::errors::SlugError;

    #[test]
    fn test_user_error_mapping() {
        assert_eq!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.c".to_string())),
            ApiError::Conflict("User already registered".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::DatabaseError("connection refused".to_string())),
            ApiError::InternalServerError("Internal server error".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::EmptyPassword).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_article_error_mapping() {
        assert_eq!(
            ApiError::from(ArticleError::Forbidden("1".to_string())).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(ArticleError::RequesterNotFound("7".to_string())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ArticleError::InvalidSlug(SlugError::Empty)),
            ApiError::Validation("Invalid slug: Slug must not be empty".to_string())
        );
    }

    #[test]
    fn test_response_body_shape() {
        let body = ApiResponseBody::new("OK", serde_json::Value::Null);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "message": "OK", "data": null })
        );
    }
}
