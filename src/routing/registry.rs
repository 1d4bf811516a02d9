//! Named route registry and URL building.
//!
//! # Responsibilities
//! - Store routes keyed by symbolic name, preserving registration order
//! - Resolve names to (method, path template) pairs
//! - Build concrete request paths from a route name plus bindings
//!
//! # Design Decisions
//! - Immutable after startup population (thread-safe without locks)
//! - O(1) name lookup via index map; iteration stays in registration order
//!   because dispatch semantics depend on it
//! - Building goes through the same parsed template the dispatcher matches
//!   against, so generated URLs and dispatch can never drift apart

use std::collections::HashMap;

use axum::http::Method;

use crate::routing::error::RouteError;
use crate::routing::template::{PathTemplate, RouteParams};

/// A named binding of an HTTP method and path template.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    method: Method,
    template: PathTemplate,
}

impl Route {
    /// The route's symbolic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The HTTP method this route answers to.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The parsed path template.
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }
}

/// Registry mapping route names to routes.
///
/// Populated exactly once during process initialization and read-only
/// afterward; shared between server and client via `Arc`. There is no
/// removal operation.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route under a unique name.
    ///
    /// The template is parsed here, once; registration failures are
    /// programmer errors and should abort startup.
    pub fn register(&mut self, name: &str, method: Method, template: &str) -> Result<(), RouteError> {
        if self.by_name.contains_key(name) {
            return Err(RouteError::DuplicateRoute {
                name: name.to_string(),
            });
        }
        let template = PathTemplate::parse(template)?;
        self.by_name.insert(name.to_string(), self.routes.len());
        self.routes.push(Route {
            name: name.to_string(),
            method,
            template,
        });
        Ok(())
    }

    /// Resolve a route by name.
    pub fn lookup(&self, name: &str) -> Result<&Route, RouteError> {
        self.by_name
            .get(name)
            .map(|&i| &self.routes[i])
            .ok_or_else(|| RouteError::UnknownRoute {
                name: name.to_string(),
            })
    }

    /// Build a concrete request path for a named route.
    ///
    /// Every placeholder in the route's template must have a binding;
    /// extra bindings are ignored. Pure and idempotent.
    pub fn build<K, V>(&self, name: &str, params: &[(K, V)]) -> Result<String, RouteError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self.lookup(name)?;
        let params: RouteParams = params
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        route.template.render(&route.name, &params)
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
