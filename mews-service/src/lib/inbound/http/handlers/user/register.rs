use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::SessionResponseData;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::NameError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, "User registered", session.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid first name: {0}")]
    FirstName(NameError),

    #[error("Invalid last name: {0}")]
    LastName(NameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email.trim().to_string())?;
        let first_name =
            PersonName::new(self.first_name).map_err(ParseRegisterRequestError::FirstName)?;
        let last_name =
            PersonName::new(self.last_name).map_err(ParseRegisterRequestError::LastName)?;
        Ok(RegisterCommand::new(
            email,
            self.password,
            first_name,
            last_name,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, first_name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "fahmi".to_string(),
            first_name: first_name.to_string(),
            last_name: "Rizaldi".to_string(),
        }
    }

    #[test]
    fn test_request_field_names() {
        let parsed: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "fahmi@example.com",
            "password": "fahmi",
            "firstName": "Fahmi",
            "lastName": "Rizaldi",
        }))
        .unwrap();

        assert_eq!(parsed, request("fahmi@example.com", "Fahmi"));
    }

    #[test]
    fn test_valid_request() {
        let command = request(" fahmi@example.com ", "Fahmi")
            .try_into_command()
            .unwrap();

        assert_eq!(command.email.as_str(), "fahmi@example.com");
        assert_eq!(command.first_name.as_str(), "Fahmi");
    }

    #[test]
    fn test_invalid_fields() {
        assert!(matches!(
            request("fahmi", "Fahmi").try_into_command(),
            Err(ParseRegisterRequestError::Email(_))
        ));
        assert!(matches!(
            request("fahmi@example.com", " ").try_into_command(),
            Err(ParseRegisterRequestError::FirstName(NameError::Empty))
        ));
    }
}
