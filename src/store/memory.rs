//! In-memory post store for tests and development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{Post, PostListOptions};
use crate::store::{PostStore, StoreError};

/// Mutex-guarded store holding posts in process memory.
///
/// Mirrors the Postgres store's observable behavior: ids count up from 1
/// and listings come back newest first.
#[derive(Debug, Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    posts: Vec<Post>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemStore {
    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        let inner = self.inner.lock().expect("post store mutex poisoned");
        inner
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self, opts: &PostListOptions) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.lock().expect("post store mutex poisoned");
        let mut posts = inner.posts.clone();
        posts.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then(b.id.cmp(&a.id))
        });
        Ok(posts
            .into_iter()
            .skip(opts.offset() as usize)
            .take(opts.limit() as usize)
            .collect())
    }

    async fn create(&self, mut post: Post) -> Result<Post, StoreError> {
        let mut inner = self.inner.lock().expect("post store mutex poisoned");
        inner.next_id += 1;
        post.id = inner.next_id;
        inner.posts.push(post.clone());
        Ok(post)
    }
}
