//! newswire: a web news and link-sharing service.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI / library caller                           server process
//!   ─────────────────────                          ──────────────────────
//!   client::ApiClient                              http::HttpServer
//!        │                                              │
//!        │ build URL by route name                      │ dispatch method+path
//!        ▼                                              ▼
//!   ┌──────────────────────── routing::RouteRegistry ───────────────────┐
//!   │   one immutable table: name → (method, path template)             │
//!   └───────────────────────────────────────────────────────────────────┘
//!        │                                              │
//!        ▼ HTTP (JSON)                                  ▼
//!   reqwest transport  ───────────────────────▶  http::handlers → store
//! ```
//!
//! The route registry is the single source of truth: the client renders
//! request URLs from the same parsed templates the server matches against,
//! so the two sides cannot drift apart. Everything else (config,
//! observability, lifecycle) is conventional service plumbing.

// Core subsystems
pub mod client;
pub mod config;
pub mod http;
pub mod model;
pub mod routing;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use client::ApiClient;
pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::Post;
pub use routing::RouteRegistry;
