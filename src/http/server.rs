//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (request ID, tracing,
//!   timeout)
//! - Mount the API under `/api` and route every request through the
//!   dispatcher
//! - Bind the server to a listener and serve until shutdown
//!
//! # Design Decisions
//! - One catch-all handler; route selection happens in the routing
//!   subsystem, not in Axum's router, so the server and the client
//!   consult the same table
//! - Dispatch outcomes map onto status codes here: no match is 404,
//!   a method mismatch is 405 with an `Allow` header
//! - Request metrics are recorded per request with the route name label

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::request::{request_span, x_request_id, UuidRequestId};
use crate::observability::metrics;
use crate::routing::{api_routes, names, Dispatch, Dispatcher, RouteParams};
use crate::store::PostStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub store: Arc<dyn PostStore>,
}

/// HTTP server for the newswire API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: ServerConfig, store: Arc<dyn PostStore>) -> Self {
        let state = AppState {
            dispatcher: Dispatcher::new(Arc::new(api_routes())),
            store,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/api", any(api_handler))
            .route("/api/{*path}", any(api_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(x_request_id(), UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::new(x_request_id()))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every `/api` request.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let full_path = request.uri().path().to_string();
    let path = match full_path.strip_prefix("/api") {
        Some("") => "/",
        Some(rest) => rest,
        None => full_path.as_str(),
    };

    let (route_label, response) = match state.dispatcher.dispatch(&method, path) {
        Dispatch::Matched { route, params } => {
            let name = route.name().to_string();
            let response = invoke(route.name(), &state, params, request).await;
            (name, response)
        }
        Dispatch::MethodMismatch { allowed } => {
            tracing::debug!(method = %method, path = %path, "method not allowed");
            let joined = allowed
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let mut response =
                (StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into_response();
            if let Ok(value) = HeaderValue::from_str(&joined) {
                response.headers_mut().insert(header::ALLOW, value);
            }
            ("none".to_string(), response)
        }
        Dispatch::NoRouteFound => {
            tracing::debug!(method = %method, path = %path, "no route matched");
            (
                "none".to_string(),
                (StatusCode::NOT_FOUND, "no matching route").into_response(),
            )
        }
    };

    metrics::record_request(
        method.as_str(),
        response.status().as_u16(),
        &route_label,
        start,
    );
    response
}

/// Invoke the handler bound to a matched route.
async fn invoke(
    name: &str,
    state: &AppState,
    params: RouteParams,
    request: Request<Body>,
) -> Response {
    let result = match name {
        names::POSTS => handlers::list_posts(state.store.as_ref(), request.uri())
            .await
            .map(IntoResponse::into_response),
        names::POST => handlers::get_post(state.store.as_ref(), &params)
            .await
            .map(IntoResponse::into_response),
        names::CREATE_POST => handlers::create_post(state.store.as_ref(), request.into_body())
            .await
            .map(IntoResponse::into_response),
        other => {
            tracing::error!(route = other, "route registered without a handler");
            return (StatusCode::INTERNAL_SERVER_ERROR, "unhandled route").into_response();
        }
    };
    result.unwrap_or_else(|err| err.into_response())
}
