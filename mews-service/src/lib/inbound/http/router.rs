use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::articles::create_article;
use super::handlers::articles::delete_article;
use super::handlers::articles::find_all_articles;
use super::handlers::articles::get_article;
use super::handlers::articles::save_article;
use super::handlers::user::login;
use super::handlers::user::me;
use super::handlers::user::register;
use super::middleware::basic_auth;
use super::middleware::bearer_auth;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    article_service: Arc<dyn ArticleServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        authenticator,
    };

    let basic_routes = Router::new()
        .route("/api/v1/user/login", post(login))
        .route("/api/v1/user/register", post(register))
        .route_layer(middleware::from_fn_with_state(state.clone(), basic_auth));

    let bearer_routes = Router::new()
        .route("/api/v1/user/me", get(me))
        .route(
            "/api/v1/articles",
            get(find_all_articles)
                .post(create_article)
                .put(save_article),
        )
        .route(
            "/api/v1/articles/:id",
            get(get_article).delete(delete_article),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    // Headers stay out of the span: they carry credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(basic_routes)
        .merge(bearer_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
