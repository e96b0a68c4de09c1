use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::domain::article::errors::SlugError;
use crate::domain::article::errors::TitleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleStatus;
use crate::inbound::http::handlers::ApiError;

pub mod create;
pub mod delete;
pub mod find_all;
pub mod get;
pub mod save;

pub use create::create_article;
pub use delete::delete_article;
pub use find_all::find_all_articles;
pub use get::get_article;
pub use save::save_article;

/// Full article representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponseData {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Article> for ArticleResponseData {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.0,
            author_id: article.author_id.0,
            title: article.title.as_str().to_string(),
            content: article.content.clone(),
            slug: article.slug.as_str().to_string(),
            status: article.status,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Error)]
enum ParseArticleRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Invalid slug: {0}")]
    Slug(#[from] SlugError),
}

impl From<ParseArticleRequestError> for ApiError {
    fn from(err: ParseArticleRequestError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
