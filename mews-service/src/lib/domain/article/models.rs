use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::article::errors::SlugError;
use crate::domain::article::errors::StatusError;
use crate::domain::article::errors::TitleError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Article aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: String,
    pub slug: Slug,
    pub status: ArticleStatus,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Admins reach every article; contributors only their own.
    pub fn is_accessible_by(&self, user: &User) -> bool {
        user.is_admin() || self.author_id == user.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(pub i64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Article title value type
///
/// Trimmed, non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, TitleError> {
        let title = title.trim();
        let length = title.chars().count();

        if length == 0 {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// URL slug value type
///
/// Ensures slug is 1-255 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

impl Slug {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid slug.
    ///
    /// # Errors
    /// * `Empty` - Slug is empty
    /// * `TooLong` - Slug longer than 255 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumerics, `_` and `-`
    pub fn new(slug: String) -> Result<Self, SlugError> {
        let length = slug.chars().count();
        if length == 0 {
            return Err(SlugError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(SlugError::InvalidCharacters);
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::Published => "PUBLISHED",
            ArticleStatus::Archived => "ARCHIVED",
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ArticleStatus::Draft),
            "PUBLISHED" => Ok(ArticleStatus::Published),
            "ARCHIVED" => Ok(ArticleStatus::Archived),
            other => Err(StatusError(other.to_string())),
        }
    }
}

/// Command to create an article with domain types
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: ArticleTitle,
    pub content: String,
    pub slug: Slug,
    pub status: ArticleStatus,
}

/// Command to update an existing article.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct SaveArticleCommand {
    pub title: Option<ArticleTitle>,
    pub content: Option<String>,
    pub slug: Option<Slug>,
    pub status: Option<ArticleStatus>,
}

/// Article row to be inserted; storage assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: String,
    pub slug: Slug,
    pub status: ArticleStatus,
    pub author_id: UserId,
}

/// Normalised listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub keyword: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl ArticleQuery {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Apply listing defaults: page 1, limit 10 capped at 100, blank keyword ignored.
    pub fn new(keyword: Option<String>, page: Option<i64>, limit: Option<i64>) -> Self {
        let keyword = keyword
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty());
        let page = page.filter(|page| *page > 0).unwrap_or(1);
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);

        Self {
            keyword,
            page,
            limit,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Repository-level filter derived from a query and the requester's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFilter {
    pub keyword: Option<String>,
    /// Restrict to one author; `None` searches every article.
    pub author_id: Option<UserId>,
    pub offset: i64,
    pub limit: i64,
}

/// One page of articles plus the total across all pages.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub rows: Vec<Article>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl ArticlePage {
    pub fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }
}
