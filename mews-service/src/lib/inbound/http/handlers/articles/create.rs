use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ArticleResponseData;
use super::ParseArticleRequestError;
use crate::domain::article::models::ArticleStatus;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::Slug;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_article(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .article_service
        .create(&current_user.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, "Article created", article.into()))
}

/// HTTP request body for creating an article (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArticleRequest {
    title: String,
    content: String,
    slug: String,
    status: ArticleStatus,
}

impl CreateArticleRequest {
    fn try_into_command(self) -> Result<CreateArticleCommand, ParseArticleRequestError> {
        Ok(CreateArticleCommand {
            title: ArticleTitle::new(self.title)?,
            content: self.content,
            slug: Slug::new(self.slug)?,
            status: self.status,
        })
    }
}
