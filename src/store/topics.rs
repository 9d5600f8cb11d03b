use rusqlite::{Connection, OptionalExtension, params};

use crate::{error::AppError, models::Topic};

use super::NO_TOPIC;

pub fn fetch_topics(conn: &Connection) -> Result<Vec<Topic>, AppError> {
    let mut stmt = conn.prepare("SELECT slug, description FROM topics ORDER BY slug")?;
    let topics = stmt
        .query_map([], Topic::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(topics)
}

/// Fail with "No topic found" unless `slug` names a topic.
pub fn check_topic_exists(conn: &Connection, slug: &str) -> Result<(), AppError> {
    conn.query_row("SELECT 1 FROM topics WHERE slug = ?1", params![slug], |_| {
        Ok(())
    })
    .optional()?
    .ok_or_else(|| AppError::not_found(NO_TOPIC))
}
