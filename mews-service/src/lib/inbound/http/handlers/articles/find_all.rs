use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::article::models::Article;
use crate::domain::article::models::ArticlePage;
use crate::domain::article::models::ArticleQuery;
use crate::domain::article::models::ArticleStatus;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn find_all_articles(
    State(state): State<AppState>,
    current_user: CurrentUser,
    query: Result<Query<FindAllQuery>, QueryRejection>,
) -> Result<ApiSuccess<ArticleListResponseData>, ApiError> {
    let Query(query) = query?;

    state
        .article_service
        .find_all(&current_user.id, query.into())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, "OK", page.into()))
}

/// Query string of the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FindAllQuery {
    keyword: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

impl From<FindAllQuery> for ArticleQuery {
    fn from(query: FindAllQuery) -> Self {
        ArticleQuery::new(query.keyword, query.page, query.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponseData {
    pub page_meta: PageMeta,
    pub rows: Vec<ArticleSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: i64,
    pub total_page: i64,
    pub total_data: i64,
    pub total_data_on_page: usize,
}

/// Listing row; the content is left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.0,
            author_id: article.author_id.0,
            title: article.title.as_str().to_string(),
            slug: article.slug.as_str().to_string(),
            status: article.status,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

impl From<&ArticlePage> for ArticleListResponseData {
    fn from(page: &ArticlePage) -> Self {
        Self {
            page_meta: PageMeta {
                current_page: page.page,
                total_page: page.total_pages(),
                total_data: page.total,
                total_data_on_page: page.rows.len(),
            },
            rows: page.rows.iter().map(ArticleSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_uses_defaults() {
        let query: ArticleQuery = FindAllQuery::default().into();

        assert_eq!(query, ArticleQuery::new(None, Some(1), Some(10)));
    }

    #[test]
    fn test_page_meta() {
        let page = ArticlePage {
            rows: Vec::new(),
            total: 21,
            page: 3,
            limit: 10,
        };

        let data = ArticleListResponseData::from(&page);

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({
                "pageMeta": {
                    "currentPage": 3,
                    "totalPage": 3,
                    "totalData": 21,
                    "totalDataOnPage": 0,
                },
                "rows": [],
            })
        );
    }
}
