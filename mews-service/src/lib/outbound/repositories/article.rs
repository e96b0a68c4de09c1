use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::errors::SlugError;
use crate::domain::article::errors::TitleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleFilter;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::Slug;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

const ARTICLE_COLUMNS: &str =
    "id, title, content, slug, status, author_id, created_at, updated_at";

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    slug: String,
    status: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId(row.id),
            title: ArticleTitle::new(row.title)
                .map_err(|e: TitleError| ArticleError::DatabaseError(e.to_string()))?,
            content: row.content,
            slug: Slug::new(row.slug)
                .map_err(|e: SlugError| ArticleError::DatabaseError(e.to_string()))?,
            status: row.status.parse()?,
            author_id: UserId(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, slug: &Slug) -> ArticleError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("articles_slug_key") {
            return ArticleError::SlugAlreadyExists(slug.to_string());
        }
    }
    ArticleError::DatabaseError(e.to_string())
}

/// Escape `LIKE` metacharacters so the keyword matches literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    builder.push(" WHERE TRUE");

    if let Some(author_id) = filter.author_id {
        builder.push(" AND author_id = ").push_bind(author_id.0);
    }

    if let Some(keyword) = &filter.keyword {
        let pattern = format!("%{}%", escape_like(keyword));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR slug ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO articles (title, content, slug, status, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article.title.as_str())
        .bind(&article.content)
        .bind(article.slug.as_str())
        .bind(article.status.as_str())
        .bind(article.author_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &article.slug))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
        .map(Article::try_from)
        .transpose()
    }

    async fn search(&self, filter: &ArticleFilter) -> Result<(Vec<Article>, i64), ArticleError> {
        let mut rows_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles"
        ));
        push_filter(&mut rows_query, filter);
        rows_query
            .push(" ORDER BY id LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = rows_query
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filter(&mut count_query, filter);

        let (total,) = count_query
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((articles, total))
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            UPDATE articles
            SET title = $2, content = $3, slug = $4, status = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article.id.0)
        .bind(article.title.as_str())
        .bind(&article.content)
        .bind(article.slug.as_str())
        .bind(article.status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &article.slug))?
        .ok_or_else(|| ArticleError::NotFound(article.id.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_filter_sql() {
        let filter = ArticleFilter {
            keyword: Some("rust".to_string()),
            author_id: Some(UserId(2)),
            offset: 0,
            limit: 10,
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filter(&mut builder, &filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM articles WHERE TRUE AND author_id = $1 \
             AND (title ILIKE $2 OR slug ILIKE $3 OR content ILIKE $4)"
        );
    }

    #[test]
    fn test_filter_sql_without_restrictions() {
        let filter = ArticleFilter {
            keyword: None,
            author_id: None,
            offset: 0,
            limit: 10,
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filter(&mut builder, &filter);

        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM articles WHERE TRUE");
    }
}
