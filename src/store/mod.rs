//! Post persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (http/handlers.rs)
//!     → PostStore trait (get / list / create)
//!     → postgres.rs (sqlx pool) in production
//!     → memory.rs (mutex-guarded vec) in tests and development
//! ```
//!
//! # Design Decisions
//! - Handlers depend on `Arc<dyn PostStore>`, never a concrete backend
//! - The store assigns ids; callers hand in a post and get the stored
//!   value back
//! - Both backends order listings the same way (newest first) so behavior
//!   does not depend on the backend chosen

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Post, PostListOptions};

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No post with this id exists.
    #[error("post {id} not found")]
    NotFound { id: i64 },

    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operations for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch a single post by id.
    async fn get(&self, id: i64) -> Result<Post, StoreError>;

    /// List posts, newest first, windowed by the options.
    async fn list(&self, opts: &PostListOptions) -> Result<Vec<Post>, StoreError>;

    /// Persist a new post, returning it with its assigned id.
    async fn create(&self, post: Post) -> Result<Post, StoreError>;
}

pub use memory::MemStore;
pub use postgres::PgStore;
