//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, /api catch-all)
//!     → request.rs (request ID, trace span)
//!     → routing layer decides the handler
//!     → handlers.rs (decode body/query, call store, encode response)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use handlers::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
