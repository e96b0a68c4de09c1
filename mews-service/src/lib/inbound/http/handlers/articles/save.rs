use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ArticleResponseData;
use super::ParseArticleRequestError;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleStatus;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::SaveArticleCommand;
use crate::domain::article::models::Slug;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn save_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Result<Json<SaveArticleRequest>, JsonRejection>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let Json(body) = body?;
    let article_id = ArticleId(body.id);

    state
        .article_service
        .save(&current_user.id, &article_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, "Article saved", article.into()))
}

/// HTTP request body for updating an article (raw JSON)
///
/// Absent or empty fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveArticleRequest {
    id: i64,
    title: Option<String>,
    content: Option<String>,
    slug: Option<String>,
    status: Option<ArticleStatus>,
}

fn provided(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl SaveArticleRequest {
    fn try_into_command(self) -> Result<SaveArticleCommand, ParseArticleRequestError> {
        Ok(SaveArticleCommand {
            title: provided(self.title).map(ArticleTitle::new).transpose()?,
            content: provided(self.content),
            slug: provided(self.slug).map(Slug::new).transpose()?,
            status: self.status,
        })
    }
}
