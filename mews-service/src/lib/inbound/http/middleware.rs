use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error;

use super::handlers::ApiResponseBody;
use crate::inbound::http::router::AppState;

const BASIC_SCHEME: &str = "Basic";
const BEARER_SCHEME: &str = "Bearer";

/// Extension marking a request that passed the static credential gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicAuthenticated;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum HeaderError {
    #[error("Missing authorization header")]
    Missing,

    #[error("Authorization header is not {0}")]
    WrongScheme(&'static str),
}

/// Middleware guarding login and registration with the configured
/// username/password pair.
pub async fn basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let challenge = challenge(BASIC_SCHEME, state.authenticator.application());

    let encoded = authorization_payload(req.headers(), BASIC_SCHEME).map_err(|e| {
        tracing::warn!(reason = %e, "Basic authentication rejected");
        unauthorized(e.to_string(), challenge.as_ref())
    })?;

    let credentials = state.authenticator.check_basic(encoded).map_err(|e| {
        tracing::warn!(reason = %e, "Basic authentication rejected");
        unauthorized(e.to_string(), challenge.as_ref())
    })?;

    tracing::debug!(username = %credentials.username, "Basic authentication accepted");
    req.extensions_mut().insert(BasicAuthenticated);

    Ok(next.run(req).await)
}

/// Middleware that validates bearer tokens and adds the caller's identity to
/// request extensions.
pub async fn bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let challenge = challenge(BEARER_SCHEME, state.authenticator.application());

    let token = authorization_payload(req.headers(), BEARER_SCHEME).map_err(|e| {
        tracing::warn!(reason = %e, "Bearer authentication rejected");
        unauthorized(e.to_string(), challenge.as_ref())
    })?;

    let identity = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = ?e, "Bearer authentication rejected");
        unauthorized(e.to_string(), challenge.as_ref())
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Return what follows `<scheme>` and its separating spaces in the
/// Authorization header.
fn authorization_payload<'a>(
    headers: &'a HeaderMap,
    scheme: &'static str,
) -> Result<&'a str, HeaderError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(HeaderError::Missing)?;

    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(scheme))
        .and_then(|rest| rest.strip_prefix(' '))
        .map(|payload| payload.trim_start_matches(' '))
        .ok_or(HeaderError::WrongScheme(scheme))
}

fn challenge(scheme: &str, application: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{scheme} realm={application}")).ok()
}

fn unauthorized(message: String, challenge: Option<&HeaderValue>) -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponseBody::new(message, serde_json::Value::Null)),
    )
        .into_response();

    if let Some(challenge) = challenge {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, challenge.clone());
    }

    response
}
