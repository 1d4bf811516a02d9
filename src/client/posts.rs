//! Posts resource client.

use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ClientError};
use crate::model::{Post, PostListOptions};
use crate::routing::names;

/// Typed operations on the Posts resource.
///
/// Obtained from [`ApiClient::posts`]; borrows the client, so services are
/// created per call site and carry no state of their own.
pub struct PostsService<'a> {
    pub(super) client: &'a ApiClient,
}

impl PostsService<'_> {
    /// Fetch a single post by id.
    pub async fn get(&self, id: i64) -> Result<Post, ClientError> {
        let url = self
            .client
            .url_for(names::POST, &[("ID", id.to_string())])?;
        let resp = self.client.http.get(url).send().await?;
        let mut post: Post = decode(resp).await?;
        post.normalize();
        Ok(post)
    }

    /// List posts, newest first.
    ///
    /// `None` sends no query string at all; set fields of `Some(opts)` are
    /// passed through as query values.
    pub async fn list(&self, opts: Option<&PostListOptions>) -> Result<Vec<Post>, ClientError> {
        let url = self.client.url_for::<&str, &str>(names::POSTS, &[])?;
        let mut req = self.client.http.get(url);
        if let Some(opts) = opts {
            req = req.query(opts);
        }
        let resp = req.send().await?;
        let mut posts: Vec<Post> = decode(resp).await?;
        for post in &mut posts {
            post.normalize();
        }
        Ok(posts)
    }

    /// Submit a new post.
    ///
    /// On success the caller's post is overwritten with the decoded
    /// response, making the server-assigned `id` and `submitted_at`
    /// visible without a second fetch. Do not share one post value across
    /// concurrent create calls.
    pub async fn create(&self, post: &mut Post) -> Result<(), ClientError> {
        let url = self.client.url_for::<&str, &str>(names::CREATE_POST, &[])?;
        let resp = self.client.http.post(url).json(post).send().await?;
        let mut created: Post = decode(resp).await?;
        created.normalize();
        *post = created;
        Ok(())
    }
}

/// Check the status, then decode the body.
///
/// The body is read as text first so an undecodable payload surfaces as
/// [`ClientError::Decode`] rather than being folded into the transport
/// error type.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let url = resp.url().clone();
    if !status.is_success() {
        return Err(ClientError::Status { status, url });
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(ClientError::Decode)
}
