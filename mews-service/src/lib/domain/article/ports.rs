use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleFilter;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticlePage;
use crate::domain::article::models::ArticleQuery;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::SaveArticleCommand;
use crate::domain::user::models::UserId;

/// Port for article domain service operations.
///
/// Every operation acts on behalf of `requester`, the user id carried by the
/// caller's token.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// List articles visible to the requester.
    ///
    /// # Errors
    /// * `RequesterNotFound` - Requester no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn find_all(
        &self,
        requester: &UserId,
        query: ArticleQuery,
    ) -> Result<ArticlePage, ArticleError>;

    /// Retrieve one article.
    ///
    /// # Errors
    /// * `RequesterNotFound` - Requester no longer exists
    /// * `NotFound` - Article does not exist
    /// * `Forbidden` - Article belongs to another user and requester is not admin
    /// * `DatabaseError` - Database operation failed
    async fn get(&self, requester: &UserId, id: &ArticleId) -> Result<Article, ArticleError>;

    /// Create an article authored by the requester.
    ///
    /// # Errors
    /// * `RequesterNotFound` - Requester no longer exists
    /// * `EmptyContent` - Content is empty
    /// * `SlugAlreadyExists` - Slug is taken
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        requester: &UserId,
        command: CreateArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// Apply the provided fields to an article.
    ///
    /// # Errors
    /// Same as `get`, plus `EmptyContent` and `SlugAlreadyExists`
    async fn save(
        &self,
        requester: &UserId,
        id: &ArticleId,
        command: SaveArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// Delete an article.
    ///
    /// # Errors
    /// Same as `get`
    async fn delete(&self, requester: &UserId, id: &ArticleId) -> Result<(), ArticleError>;
}

/// Persistence operations for article aggregate.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Persist new article to storage.
    ///
    /// # Errors
    /// * `SlugAlreadyExists` - Slug is taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError>;

    /// Retrieve one page of matching articles and the total match count.
    async fn search(&self, filter: &ArticleFilter) -> Result<(Vec<Article>, i64), ArticleError>;

    /// Update existing article in storage.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `SlugAlreadyExists` - New slug is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, article: Article) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError>;
}
