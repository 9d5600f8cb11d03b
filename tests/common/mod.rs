#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use newsdesk::{Db, create_app};
use serde_json::Value;
use tower::ServiceExt;

/// A router over a freshly seeded database in a temp directory.
pub struct TestApp {
    pub app: Router,
    pub db: Db,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = Db::open(dir.path().join("test.db")).expect("open test db");
        db.connection()
            .expect("open connection")
            .execute_batch(include_str!("../fixtures/test-data.sql"))
            .expect("seed test data");
        TestApp {
            app: create_app(db.clone()),
            db,
            _dir: dir,
        }
    }

    pub async fn raw(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Send a request and decode the JSON response (`Value::Null` for an
    /// empty body).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");
        let response = self.raw(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    /// Run a scalar query directly against the database.
    pub fn scalar(&self, sql: &str, param: i64) -> i64 {
        self.db
            .connection()
            .expect("open connection")
            .query_row(sql, [param], |row| row.get(0))
            .expect("scalar query")
    }
}

pub fn strings(items: &Value, key: &str) -> Vec<String> {
    items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item[key].as_str().expect("string field").to_string())
        .collect()
}

pub fn integers(items: &Value, key: &str) -> Vec<i64> {
    items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item[key].as_i64().expect("integer field"))
        .collect()
}

pub fn is_sorted_desc<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] >= w[1])
}

pub fn is_sorted_asc<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
