use std::sync::Arc;

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
use crate::domain::article::ports::ArticleRepository;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for article operations.
///
/// Resolves the requester on every call so role changes and deletions take
/// effect without waiting for token expiry.
pub struct ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    articles: Arc<AR>,
    users: Arc<UR>,
}

impl<AR, UR> ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    pub fn new(articles: Arc<AR>, users: Arc<UR>) -> Self {
        Self { articles, users }
    }

    async fn requester(&self, id: &UserId) -> Result<User, ArticleError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
            .ok_or_else(|| ArticleError::RequesterNotFound(id.to_string()))
    }

    async fn accessible_article(
        &self,
        requester: &UserId,
        id: &ArticleId,
    ) -> Result<Article, ArticleError> {
        let user = self.requester(requester).await?;
        let article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ArticleError::NotFound(id.to_string()))?;

        if !article.is_accessible_by(&user) {
            tracing::warn!(
                user_id = %user.id,
                article_id = %article.id,
                "Article access denied"
            );
            return Err(ArticleError::Forbidden(id.to_string()));
        }

        Ok(article)
    }
}

#[async_trait]
impl<AR, UR> ArticleServicePort for ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    async fn find_all(
        &self,
        requester: &UserId,
        query: ArticleQuery,
    ) -> Result<ArticlePage, ArticleError> {
        let user = self.requester(requester).await?;

        let filter = ArticleFilter {
            keyword: query.keyword.clone(),
            author_id: (!user.is_admin()).then_some(user.id),
            offset: query.offset(),
            limit: query.limit,
        };
        let (rows, total) = self.articles.search(&filter).await?;

        Ok(ArticlePage {
            rows,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn get(&self, requester: &UserId, id: &ArticleId) -> Result<Article, ArticleError> {
        self.accessible_article(requester, id).await
    }

    async fn create(
        &self,
        requester: &UserId,
        command: CreateArticleCommand,
    ) -> Result<Article, ArticleError> {
        if command.content.trim().is_empty() {
            return Err(ArticleError::EmptyContent);
        }

        let author = self.requester(requester).await?;
        let article = self
            .articles
            .create(NewArticle {
                title: command.title,
                content: command.content,
                slug: command.slug,
                status: command.status,
                author_id: author.id,
            })
            .await?;

        tracing::info!(article_id = %article.id, author_id = %author.id, "Article created");
        Ok(article)
    }

    async fn save(
        &self,
        requester: &UserId,
        id: &ArticleId,
        command: SaveArticleCommand,
    ) -> Result<Article, ArticleError> {
        let mut article = self.accessible_article(requester, id).await?;

        if let Some(title) = command.title {
            article.title = title;
        }

        if let Some(content) = command.content.filter(|content| !content.trim().is_empty()) {
            article.content = content;
        }

        if let Some(slug) = command.slug {
            article.slug = slug;
        }

        if let Some(status) = command.status {
            article.status = status;
        }

        self.articles.update(article).await
    }

    async fn delete(&self, requester: &UserId, id: &ArticleId) -> Result<(), ArticleError> {
        let article = self.accessible_article(requester, id).await?;
        self.articles.delete(&article.id).await?;

        tracing::info!(article_id = %article.id, "Article deleted");
        Ok(())
    }
}
