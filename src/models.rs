use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: String,
    pub votes: i64,
    pub article_img_url: String,
}

/// An article together with the live number of comments attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleWithCount {
    #[serde(flatten)]
    pub article: Article,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub article_id: i64,
    pub author: String,
    pub body: String,
    pub votes: i64,
    pub created_at: String,
}

/// Input of a comment insert. Missing fields stay `None` and are left to the
/// NOT NULL constraints of the `comments` table.
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub author: Option<String>,
    pub body: Option<String>,
}

/// Columns accepted by `sort_by` on the article listing.
pub const SORT_BY_COLUMNS: &[&str] = &[
    "article_id",
    "title",
    "topic",
    "author",
    "created_at",
    "votes",
    "comment_count",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortBy {
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None => Ok(SortBy::default()),
            Some("article_id") => Ok(SortBy::ArticleId),
            Some("title") => Ok(SortBy::Title),
            Some("topic") => Ok(SortBy::Topic),
            Some("author") => Ok(SortBy::Author),
            Some("created_at") => Ok(SortBy::CreatedAt),
            Some("votes") => Ok(SortBy::Votes),
            Some("comment_count") => Ok(SortBy::CommentCount),
            Some(other) => {
                tracing::debug!(sort_by = other, allowed = ?SORT_BY_COLUMNS, "invalid sort_by");
                Err(AppError::bad_request())
            }
        }
    }

    /// SQL expression this column sorts on. Never built from user input.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortBy::ArticleId => "articles.article_id",
            SortBy::Title => "articles.title",
            SortBy::Topic => "articles.topic",
            SortBy::Author => "articles.author",
            SortBy::CreatedAt => "articles.created_at",
            SortBy::Votes => "articles.votes",
            SortBy::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc`, ignoring case.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None => Ok(SortOrder::default()),
            Some(v) if v.eq_ignore_ascii_case("asc") => Ok(SortOrder::Asc),
            Some(v) if v.eq_ignore_ascii_case("desc") => Ok(SortOrder::Desc),
            Some(other) => {
                tracing::debug!(order = other, "invalid order");
                Err(AppError::bad_request())
            }
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated article listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl ArticleFilter {
    /// Validate raw query parameters. `order` is checked before `sort_by`.
    pub fn parse(
        topic: Option<String>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Self, AppError> {
        let order = SortOrder::parse(order)?;
        let sort_by = SortBy::parse(sort_by)?;
        Ok(ArticleFilter {
            topic,
            sort_by,
            order,
        })
    }
}

impl Topic {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Topic {
            slug: row.get("slug")?,
            description: row.get("description")?,
        })
    }
}

impl User {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            username: row.get("username")?,
            name: row.get("name")?,
            avatar_url: row.get("avatar_url")?,
        })
    }
}

impl Article {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Article {
            article_id: row.get("article_id")?,
            title: row.get("title")?,
            topic: row.get("topic")?,
            author: row.get("author")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
            votes: row.get("votes")?,
            article_img_url: row.get("article_img_url")?,
        })
    }
}

impl ArticleWithCount {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ArticleWithCount {
            article: Article::from_row(row)?,
            comment_count: row.get("comment_count")?,
        })
    }
}

impl Comment {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Comment {
            comment_id: row.get("comment_id")?,
            article_id: row.get("article_id")?,
            author: row.get("author")?,
            body: row.get("body")?,
            votes: row.get("votes")?,
            created_at: row.get("created_at")?,
        })
    }
}
