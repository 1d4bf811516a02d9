//! Postgres-backed post store.

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::model::{Post, PostListOptions};
use crate::store::{PostStore, StoreError};

/// Schema statements, executed in order by `create_schema`.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS posts (
        id              BIGSERIAL PRIMARY KEY,
        title           TEXT NOT NULL,
        link_url        TEXT NOT NULL,
        body            TEXT NOT NULL DEFAULT '',
        submitted_at    TIMESTAMPTZ NOT NULL,
        author_user_id  BIGINT NOT NULL DEFAULT 0
    )",
    "CREATE INDEX IF NOT EXISTS posts_submitted_at_idx
        ON posts (submitted_at DESC, id DESC)",
];

const COLUMNS: &str = "id, title, link_url, body, submitted_at, author_user_id";

/// Post store backed by a sqlx Postgres pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a pool using the configured limits.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the tables and indexes this service needs. Idempotent.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        link_url: row.try_get("link_url")?,
        body: row.try_get("body")?,
        submitted_at: row.try_get("submitted_at")?,
        author_user_id: row.try_get("author_user_id")?,
    })
}

#[async_trait]
impl PostStore for PgStore {
    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(row_to_post(&row)?),
            None => Err(StoreError::NotFound { id }),
        }
    }

    async fn list(&self, opts: &PostListOptions) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM posts
             ORDER BY submitted_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(opts.limit()))
        .bind(i64::from(opts.offset()))
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| row_to_post(row).map_err(StoreError::from))
            .collect()
    }

    async fn create(&self, mut post: Post) -> Result<Post, StoreError> {
        let row = sqlx::query(
            "INSERT INTO posts (title, link_url, body, submitted_at, author_user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&post.title)
        .bind(&post.link_url)
        .bind(&post.body)
        .bind(post.submitted_at)
        .bind(post.author_user_id)
        .fetch_one(&self.pool)
        .await?;
        post.id = row.try_get("id")?;
        Ok(post)
    }
}
