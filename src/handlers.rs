use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection, StringRejection},
    },
    response::IntoResponse,
};
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    HandlerState,
    error::AppError,
    models::{ArticleFilter, NewComment},
    store::{articles, comments, topics, users},
    utils::{get_body, integer_field, optional_string_field, parse_id},
};

const ENDPOINTS: &str = include_str!("../docs/endpoints.json");

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub async fn get_topics(
    State(handler_state): State<Arc<HandlerState>>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let topics = db.run(topics::fetch_topics).await?;
    Ok(Json(json!({ "topics": topics })))
}

pub async fn get_articles(
    State(handler_state): State<Arc<HandlerState>>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let Query(query) = query?;
    let ArticlesQuery {
        topic,
        sort_by,
        order,
    } = query;
    let filter = ArticleFilter::parse(topic, sort_by.as_deref(), order.as_deref())?;

    let articles = match filter.topic.clone() {
        Some(topic) => {
            let (_, articles) = tokio::try_join!(
                db.run(move |conn| topics::check_topic_exists(conn, &topic)),
                db.run(move |conn| articles::fetch_articles(conn, &filter)),
            )?;
            articles
        }
        None => {
            db.run(move |conn| articles::fetch_articles(conn, &filter))
                .await?
        }
    };
    Ok(Json(json!({ "articles": articles })))
}

pub async fn get_article_by_id(
    State(handler_state): State<Arc<HandlerState>>,
    article_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let article_id = path_id(article_id)?;
    let article = db
        .run(move |conn| articles::fetch_article_by_id(conn, article_id))
        .await?;
    Ok(Json(json!({ "article": article })))
}

pub async fn patch_article_votes(
    State(handler_state): State<Arc<HandlerState>>,
    article_id: Result<Path<String>, PathRejection>,
    body: Result<String, StringRejection>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let article_id = path_id(article_id)?;
    let body = get_body(&body?)?;
    let inc_votes = integer_field(&body, "inc_votes")?;

    let (_, updated) = tokio::try_join!(
        db.run(move |conn| articles::fetch_article_by_id(conn, article_id)),
        db.run(move |conn| articles::update_votes(conn, article_id, inc_votes)),
    )?;
    tracing::debug!(article_id, inc_votes, votes = updated.votes, "votes updated");
    Ok(Json(json!({ "article": updated })))
}

pub async fn get_comments_by_article_id(
    State(handler_state): State<Arc<HandlerState>>,
    article_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let article_id = path_id(article_id)?;
    let (_, comments) = tokio::try_join!(
        db.run(move |conn| articles::fetch_article_by_id(conn, article_id)),
        db.run(move |conn| comments::fetch_comments_by_article_id(conn, article_id)),
    )?;
    Ok(Json(json!({ "comments": comments })))
}

pub async fn post_comment(
    State(handler_state): State<Arc<HandlerState>>,
    article_id: Result<Path<String>, PathRejection>,
    body: Result<String, StringRejection>,
) -> Result<impl IntoResponse, AppError> {
    let HandlerState { db } = &*handler_state;
    let article_id = path_id(article_id)?;
    let body = get_body(&body?)?;
    let new_comment = NewComment {
        author: optional_string_field(&body, "author")?,
        body: optional_string_field(&body, "body")?,
    };
    let comment = db
        .run(move |conn| comments::insert_comment(conn, article_id, &new_comment))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

pub async fn delete_comment_by_id(
    State(handler_state): State<Arc<HandlerState>>,
    comment_id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let HandlerState { db } = &*handler_state;
    let comment_id = path_id(comment_id)?;
    db.run(move |conn| comments::remove_comment_by_id(conn, comment_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_users(
    State(handler_state): State<Arc<HandlerState>>,
) -> Result<Json<Value>, AppError> {
    let HandlerState { db } = &*handler_state;
    let users = db.run(users::fetch_users).await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get_endpoints() -> Result<Json<Value>, AppError> {
    let endpoints: Value = serde_json::from_str(ENDPOINTS)
        .map_err(|e| AppError::Internal(format!("endpoint description is not valid JSON: {e}")))?;
    Ok(Json(json!({ "endpoints": endpoints })))
}

pub async fn path_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "msg": "Path not found" })))
}

/// Extract and parse a single integer path parameter.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i64, AppError> {
    let Path(raw) = path?;
    parse_id(&raw)
}
