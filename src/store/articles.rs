use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    error::AppError,
    models::{Article, ArticleFilter, ArticleWithCount},
};

use super::NO_ARTICLE;

const ARTICLE_WITH_COUNT: &str = "SELECT articles.article_id, articles.title, articles.topic, \
     articles.author, articles.body, articles.created_at, articles.votes, \
     articles.article_img_url, COUNT(comments.comment_id) AS comment_count \
     FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id";

/// Build the listing query. Only the allow-listed identifiers carried by
/// `filter` are interpolated; the topic is bound as a parameter.
fn listing_sql(filter: &ArticleFilter) -> String {
    let where_clause = if filter.topic.is_some() {
        " WHERE articles.topic = ?1"
    } else {
        ""
    };
    format!(
        "{ARTICLE_WITH_COUNT}{where_clause} GROUP BY articles.article_id \
         ORDER BY {} {}, articles.article_id {}",
        filter.sort_by.as_sql(),
        filter.order.as_sql(),
        filter.order.as_sql(),
    )
}

pub fn fetch_articles(
    conn: &Connection,
    filter: &ArticleFilter,
) -> Result<Vec<ArticleWithCount>, AppError> {
    let sql = listing_sql(filter);
    tracing::debug!(%sql, topic = ?filter.topic, "listing articles");
    let mut stmt = conn.prepare(&sql)?;
    let rows = match &filter.topic {
        Some(topic) => stmt.query_map(params![topic], ArticleWithCount::from_row)?,
        None => stmt.query_map([], ArticleWithCount::from_row)?,
    };
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn fetch_article_by_id(conn: &Connection, article_id: i64) -> Result<ArticleWithCount, AppError> {
    let sql = format!("{ARTICLE_WITH_COUNT} WHERE articles.article_id = ?1 GROUP BY articles.article_id");
    conn.query_row(&sql, params![article_id], ArticleWithCount::from_row)
        .optional()?
        .ok_or_else(|| AppError::not_found(NO_ARTICLE))
}

/// Add `inc_votes` to the article's votes in a single statement and return
/// the updated row. No floor is applied.
pub fn update_votes(conn: &Connection, article_id: i64, inc_votes: i64) -> Result<Article, AppError> {
    conn.query_row(
        "UPDATE articles SET votes = votes + ?1 WHERE article_id = ?2 \
         RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url",
        params![inc_votes, article_id],
        Article::from_row,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found(NO_ARTICLE))
}
