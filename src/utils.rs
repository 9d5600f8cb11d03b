use serde_json::Value;

use crate::error::AppError;

/// Parse a raw request body as a JSON object.
pub fn get_body(body: &str) -> Result<Value, AppError> {
    if body.trim().is_empty() {
        tracing::debug!("missing request body");
        return Err(AppError::bad_request());
    }
    let body: Value = serde_json::from_str(body)?;
    if !body.is_object() {
        return Err(AppError::bad_request());
    }
    Ok(body)
}

/// Parse a path identifier such as `:article_id`.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::bad_request())
}

/// Read an integer-like field: a JSON integer, or a string holding one.
pub fn integer_field(body: &Value, key: &str) -> Result<i64, AppError> {
    match body.get(key) {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(AppError::bad_request),
        Some(Value::String(s)) => parse_id(s.trim()),
        _ => Err(AppError::bad_request()),
    }
}

/// Read an optional string field. Absent and `null` both read as `None`;
/// any other non-string value is rejected.
pub fn optional_string_field(body: &Value, key: &str) -> Result<Option<String>, AppError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::bad_request()),
    }
}
