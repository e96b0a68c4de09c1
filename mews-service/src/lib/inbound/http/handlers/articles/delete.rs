use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    article_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<()>, ApiError> {
    let Path(article_id) = article_id?;

    state
        .article_service
        .delete(&current_user.id, &ArticleId(article_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Article deleted", ()))
}
