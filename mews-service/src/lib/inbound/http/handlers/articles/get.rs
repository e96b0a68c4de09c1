use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ArticleResponseData;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    article_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let Path(article_id) = article_id?;

    state
        .article_service
        .get(&current_user.id, &ArticleId(article_id))
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, "OK", article.into()))
}
