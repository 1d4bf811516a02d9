//! Request dispatch against the route registry.
//!
//! # Responsibilities
//! - Match an incoming method + path against registered routes
//! - Extract path-variable bindings from the matched path
//! - Report no-route and method-mismatch outcomes distinctly
//!
//! # Design Decisions
//! - Routes are scanned in registration order; first full match wins
//! - A structural match with the wrong method is recorded and the scan
//!   continues, so several methods can share one path shape under
//!   different route names
//! - `MethodMismatch` carries the allowed methods so the server can answer
//!   405 with an `Allow` header instead of a bare 404
//! - The dispatcher never touches the request body; handler invocation and
//!   I/O belong to the server layer

use std::sync::Arc;

use axum::http::Method;

use crate::routing::registry::{Route, RouteRegistry};
use crate::routing::template::RouteParams;

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch<'a> {
    /// A route matched; `params` holds bindings for exactly the
    /// placeholders of the route's template.
    Matched {
        route: &'a Route,
        params: RouteParams,
    },
    /// Some route matched the path shape, but none with this method.
    MethodMismatch { allowed: Vec<Method> },
    /// No registered route matched the path.
    NoRouteFound,
}

/// Matches incoming requests against the shared route registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher matches against.
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Match a request's method and path.
    ///
    /// Pure and read-only; safe to call concurrently from any number of
    /// request tasks.
    pub fn dispatch(&self, method: &Method, path: &str) -> Dispatch<'_> {
        let mut allowed: Vec<Method> = Vec::new();
        for route in self.registry.iter() {
            let Some(params) = route.template().matches(path) else {
                continue;
            };
            if route.method() == method {
                return Dispatch::Matched { route, params };
            }
            if !allowed.contains(route.method()) {
                allowed.push(route.method().clone());
            }
        }
        if allowed.is_empty() {
            Dispatch::NoRouteFound
        } else {
            Dispatch::MethodMismatch { allowed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{api_routes, names};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(api_routes()))
    }

    #[test]
    fn matches_route_and_extracts_bindings() {
        let d = dispatcher();
        match d.dispatch(&Method::GET, "/posts/42") {
            Dispatch::Matched { route, params } => {
                assert_eq!(route.name(), names::POST);
                assert_eq!(params.len(), 1);
                assert_eq!(params["ID"], "42");
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn method_mismatch_is_not_no_route() {
        let d = dispatcher();
        match d.dispatch(&Method::DELETE, "/posts/42") {
            Dispatch::MethodMismatch { allowed } => assert_eq!(allowed, vec![Method::GET]),
            other => panic!("expected MethodMismatch, got {other:?}"),
        }
        assert!(matches!(
            d.dispatch(&Method::GET, "/comments"),
            Dispatch::NoRouteFound
        ));
    }

    #[test]
    fn shared_path_shape_dispatches_by_method() {
        let d = dispatcher();
        match d.dispatch(&Method::GET, "/posts") {
            Dispatch::Matched { route, .. } => assert_eq!(route.name(), names::POSTS),
            other => panic!("expected Matched, got {other:?}"),
        }
        // POST /posts must scan past the GET route to the later create route.
        match d.dispatch(&Method::POST, "/posts") {
            Dispatch::Matched { route, .. } => assert_eq!(route.name(), names::CREATE_POST),
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_collects_every_allowed_method() {
        let d = dispatcher();
        match d.dispatch(&Method::DELETE, "/posts") {
            Dispatch::MethodMismatch { allowed } => {
                assert!(allowed.contains(&Method::GET));
                assert!(allowed.contains(&Method::POST));
            }
            other => panic!("expected MethodMismatch, got {other:?}"),
        }
    }

    #[test]
    fn built_urls_round_trip_through_dispatch() {
        let d = dispatcher();
        let cases: &[(&str, &[(&str, &str)])] = &[
            (names::POSTS, &[]),
            (names::POST, &[("ID", "123")]),
            (names::POST, &[("ID", "odd/value with spaces")]),
        ];
        for (name, bindings) in cases {
            let route = d.registry().lookup(name).unwrap();
            let path = d.registry().build(name, bindings).unwrap();
            match d.dispatch(route.method(), &path) {
                Dispatch::Matched { route: hit, params } => {
                    assert_eq!(hit.name(), *name);
                    let want: RouteParams = bindings
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                    assert_eq!(params, want, "bindings for {name} must survive the round trip");
                }
                other => panic!("built path {path:?} did not match: {other:?}"),
            }
        }
    }

    #[test]
    fn every_parameterized_route_requires_its_bindings() {
        let d = dispatcher();
        for route in d.registry().iter() {
            if route.template().param_names().next().is_none() {
                continue;
            }
            let err = d.registry().build::<&str, &str>(route.name(), &[]);
            assert!(
                matches!(err, Err(crate::routing::RouteError::MissingParameter { .. })),
                "route {} should demand its bindings",
                route.name()
            );
        }
    }
}
