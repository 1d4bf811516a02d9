//! Typed API client.
//!
//! # Data Flow
//! ```text
//! Caller (CLI, library consumer)
//!     → PostsService (posts.rs)
//!     → RouteRegistry::build (same table the server dispatches from)
//!     → reqwest (HTTP transport)
//!     → decode JSON + normalize timestamps
//!     → Caller
//! ```
//!
//! # Design Decisions
//! - URLs are never hand-assembled: every request path comes out of the
//!   shared route registry, so client and server cannot drift apart
//! - Transport failures, non-2xx statuses, and undecodable bodies are
//!   distinct error cases; callers can branch on retryability
//! - The client performs no retries; retry policy belongs to the caller

pub mod posts;

use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::routing::{api_routes, RouteError, RouteRegistry};

pub use posts::PostsService;

/// Errors returned by API client calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP transport failed (connect, deadline, cancellation).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: Url },

    /// The response body was not decodable as the expected entity.
    #[error("decoding response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request URL could not be built from the route table.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// The built path did not join onto the base URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the newswire JSON API.
///
/// Holds the HTTP transport, the API base URL (including the `/api`
/// prefix), and the shared route registry. Cheap to share; all state is
/// read-only after construction, so concurrent calls need no locking.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    routes: Arc<RouteRegistry>,
}

impl ApiClient {
    /// Create a client with a default transport.
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing transport (connection pools,
    /// custom timeouts).
    pub fn with_http_client(http: reqwest::Client, mut base_url: Url) -> Self {
        // `Url::join` drops the last path segment unless the base ends
        // with a slash; normalize once here instead of at every call.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            routes: Arc::new(api_routes()),
        }
    }

    /// The Posts resource.
    pub fn posts(&self) -> PostsService<'_> {
        PostsService { client: self }
    }

    /// The route table this client builds URLs from.
    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a named route with the given bindings.
    pub fn url_for<K, V>(&self, name: &str, params: &[(K, V)]) -> Result<Url, ClientError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = self.routes.build(name, params)?;
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::names;

    #[test]
    fn url_for_joins_under_the_api_prefix() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/api").unwrap());
        let url = client.url_for(names::POST, &[("ID", "7")]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/posts/7");
    }

    #[test]
    fn trailing_slash_on_base_is_not_doubled() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/api/").unwrap());
        let url = client.url_for::<&str, &str>(names::POSTS, &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/posts");
    }

    #[test]
    fn unknown_route_surfaces_as_route_error() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/api").unwrap());
        assert!(matches!(
            client.url_for::<&str, &str>("comments", &[]),
            Err(ClientError::Route(RouteError::UnknownRoute { .. }))
        ));
    }
}
