use rusqlite::Connection;

use crate::{error::AppError, models::User};

pub fn fetch_users(conn: &Connection) -> Result<Vec<User>, AppError> {
    let mut stmt = conn.prepare("SELECT username, name, avatar_url FROM users ORDER BY username")?;
    let users = stmt
        .query_map([], User::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}
