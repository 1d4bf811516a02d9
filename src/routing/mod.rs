//! Routing subsystem: the named-route registry and everything built on it.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → dispatch.rs (scan registry, extract bindings)
//!     → Return: Matched route + bindings, MethodMismatch, or NoRouteFound
//!
//! Outgoing Request (client/CLI):
//!     route name + bindings
//!     → registry.rs build (render parsed template)
//!     → concrete request path
//!
//! Registration (at startup):
//!     api_routes()
//!     → template.rs (parse each template once)
//!     → Freeze as immutable RouteRegistry, shared via Arc
//! ```
//!
//! # Design Decisions
//! - One registry value is the single source of truth for both server
//!   dispatch and client URL generation
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches/builds the same way
//! - First match wins, in registration order

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod template;

pub use dispatch::{Dispatch, Dispatcher};
pub use error::RouteError;
pub use registry::{Route, RouteRegistry};
pub use template::{PathTemplate, RouteParams, Segment};

use axum::http::Method;

/// Symbolic route names, shared by dispatch and URL building.
pub mod names {
    pub const POSTS: &str = "posts";
    pub const POST: &str = "post";
    pub const CREATE_POST: &str = "create-post";
}

/// The canonical API route table.
///
/// Registration order matters: `posts` and `create-post` share the `/posts`
/// path shape and are told apart by method during the dispatch scan. The
/// table is static, so a registration failure is a programmer error and
/// aborts startup.
pub fn api_routes() -> RouteRegistry {
    let table = [
        (names::POSTS, Method::GET, "/posts"),
        (names::POST, Method::GET, "/posts/{ID}"),
        (names::CREATE_POST, Method::POST, "/posts"),
    ];
    let mut routes = RouteRegistry::new();
    for (name, method, template) in table {
        routes
            .register(name, method, template)
            .expect("API route table is malformed");
    }
    routes
}
