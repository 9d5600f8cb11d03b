use rusqlite::{Connection, params};

use crate::{
    error::AppError,
    models::{Comment, NewComment},
};

use super::NO_COMMENT;

const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, votes, created_at";

/// Comments of one article, newest first. An unknown article simply yields
/// no rows; callers pair this with an existence check.
pub fn fetch_comments_by_article_id(
    conn: &Connection,
    article_id: i64,
) -> Result<Vec<Comment>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE article_id = ?1 \
         ORDER BY created_at DESC, comment_id DESC"
    ))?;
    let comments = stmt
        .query_map(params![article_id], Comment::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(comments)
}

/// Insert a comment and return the stored row. Referential and NOT NULL
/// checks are left to the schema.
pub fn insert_comment(
    conn: &Connection,
    article_id: i64,
    comment: &NewComment,
) -> Result<Comment, AppError> {
    let created = conn.query_row(
        &format!(
            "INSERT INTO comments (article_id, author, body) VALUES (?1, ?2, ?3) \
             RETURNING {COMMENT_COLUMNS}"
        ),
        params![article_id, comment.author, comment.body],
        Comment::from_row,
    )?;
    tracing::debug!(comment_id = created.comment_id, article_id, "comment created");
    Ok(created)
}

pub fn remove_comment_by_id(conn: &Connection, comment_id: i64) -> Result<(), AppError> {
    let deleted = conn.execute(
        "DELETE FROM comments WHERE comment_id = ?1",
        params![comment_id],
    )?;
    if deleted == 0 {
        return Err(AppError::not_found(NO_COMMENT));
    }
    tracing::debug!(comment_id, "comment deleted");
    Ok(())
}
