use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection, StringRejection},
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use rusqlite::ffi;
use serde_json::json;
use std::fmt;

pub const BAD_REQUEST: &str = "Bad Request";
pub const NOT_FOUND: &str = "Not found";
pub const INTERNAL: &str = "Internal Server Error!";

/// Application error type for HTTP handlers.
/// Every variant renders as `{"msg": ...}` with the status picked by
/// [`AppError::status_and_msg`].
#[derive(Debug)]
pub enum AppError {
    /// Malformed identifier, missing field, disallowed sort/order value
    BadRequest(String),
    /// Referenced entity does not exist
    NotFound(String),
    /// Failure reported by SQLite, classified by error code on the way out
    Storage(rusqlite::Error),
    /// Internal/unexpected error
    Internal(String),
}

impl AppError {
    pub fn bad_request() -> Self {
        AppError::BadRequest(BAD_REQUEST.to_string())
    }

    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }

    /// Resolve the response status and client-facing message.
    ///
    /// Application errors carry their own message. Storage errors are
    /// inspected by SQLite code; anything unrecognised becomes a 500 with a
    /// generic message.
    pub fn status_and_msg(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Storage(err) => match classify_storage_error(err) {
                Some(status) if status == StatusCode::NOT_FOUND => (status, NOT_FOUND.to_string()),
                Some(status) => (status, BAD_REQUEST.to_string()),
                None => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
            },
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
        }
    }
}

/// Map SQLite failures that stem from client input to a 4xx status.
fn classify_storage_error(err: &rusqlite::Error) -> Option<StatusCode> {
    let rusqlite::Error::SqliteFailure(ffi_err, detail) = err else {
        return None;
    };
    match ffi_err.extended_code {
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(StatusCode::NOT_FOUND),
        ffi::SQLITE_CONSTRAINT_NOTNULL => Some(StatusCode::BAD_REQUEST),
        // votes must stay integral; an overflowing sum is promoted to REAL
        ffi::SQLITE_CONSTRAINT_CHECK => Some(StatusCode::BAD_REQUEST),
        ffi::SQLITE_MISMATCH => Some(StatusCode::BAD_REQUEST),
        ffi::SQLITE_ERROR
            if detail
                .as_deref()
                .is_some_and(|d| d.starts_with("no such column")) =>
        {
            Some(StatusCode::BAD_REQUEST)
        }
        _ => None,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "{msg}"),
            AppError::NotFound(msg) => write!(f, "{msg}"),
            AppError::Storage(err) => write!(f, "{err}"),
            AppError::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Storage(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!(error = %err, "rejecting unparsable JSON");
        AppError::bad_request()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejecting path parameters");
        AppError::bad_request()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejecting query string");
        AppError::bad_request()
    }
}

impl From<StringRejection> for AppError {
    fn from(rejection: StringRejection) -> Self {
        tracing::debug!(error = %rejection, "rejecting request body");
        AppError::bad_request()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("storage task failed: {err}"))
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_msg();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "msg": msg }))).into_response()
    }
}
