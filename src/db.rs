use std::{path::PathBuf, sync::Arc, time::Duration};

use rusqlite::Connection;

use crate::error::AppError;

const SCHEMA: &str = include_str!("../docs/init-db.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite database shared by all handlers.
///
/// Each data-access call opens its own connection on a blocking thread, so
/// two queries issued by the same request really do run side by side.
#[derive(Debug, Clone)]
pub struct Db {
    path: Arc<PathBuf>,
}

impl Db {
    /// Open the database at `path`, creating the schema when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let db = Db {
            path: Arc::new(path.into()),
        };
        let conn = db.connection()?;
        conn.execute_batch(SCHEMA)?;
        tracing::info!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    /// Open a new connection with foreign keys enforced.
    pub fn connection(&self) -> Result<Connection, AppError> {
        let conn = Connection::open(self.path.as_path())?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Run a data-access function on a blocking thread.
    pub async fn run<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.connection()?;
            f(&conn)
        })
        .await?
    }
}
