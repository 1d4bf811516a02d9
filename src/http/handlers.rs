//! API handlers for the Posts resource.
//!
//! # Responsibilities
//! - Decode request bodies and query strings
//! - Apply server-side field assignment (id, submission time)
//! - Map handler and store failures onto HTTP status codes
//!
//! # Design Decisions
//! - Handlers own all body I/O; the dispatcher never reads the body
//! - Database details are logged, never echoed to the client

use axum::body::{to_bytes, Body};
use axum::extract::Query;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use thiserror::Error;

use crate::model::{normalize_time, Post, PostListOptions};
use crate::routing::RouteParams;
use crate::store::{PostStore, StoreError};

/// Largest accepted request body, in bytes.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Failures a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("post not found")]
    NotFound,

    #[error("invalid value for path variable {name:?}")]
    BadPathVariable { name: &'static str },

    #[error("invalid query string")]
    BadQuery,

    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("request body unreadable or too large")]
    UnreadableBody,

    #[error("internal error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadPathVariable { .. }
            | ApiError::BadQuery
            | ApiError::MalformedBody(_)
            | ApiError::UnreadableBody => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// GET a single post by its `{ID}` path variable.
pub async fn get_post(store: &dyn PostStore, params: &RouteParams) -> Result<Json<Post>, ApiError> {
    let id = params
        .get("ID")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(ApiError::BadPathVariable { name: "ID" })?;
    let post = store.get(id).await?;
    Ok(Json(post))
}

/// GET the post listing, windowed by pass-through query values.
pub async fn list_posts(
    store: &dyn PostStore,
    uri: &Uri,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(opts): Query<PostListOptions> =
        Query::try_from_uri(uri).map_err(|_| ApiError::BadQuery)?;
    let posts = store.list(&opts).await?;
    Ok(Json(posts))
}

/// POST a new post.
///
/// The submitted id is ignored; the store assigns one. Submission time is
/// stamped here, already in canonical resolution, so what is persisted is
/// exactly what the wire will carry.
pub async fn create_post(store: &dyn PostStore, body: Body) -> Result<Json<Post>, ApiError> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::UnreadableBody)?;
    let mut post: Post = serde_json::from_slice(&bytes).map_err(ApiError::MalformedBody)?;

    post.id = 0;
    post.submitted_at = normalize_time(Utc::now());

    let created = store.create(post).await?;
    tracing::info!(id = created.id, title = %created.title, "post created");
    Ok(Json(created))
}
