//! Routing error definitions.

use thiserror::Error;

/// Errors raised by route registration, lookup, and URL building.
///
/// All of these indicate a programming error: a malformed route table or a
/// caller building a URL it does not have the variables for. They are fatal
/// at startup and surfaced immediately at call sites, never retried.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A route with this name was already registered.
    #[error("route {name:?} is already registered")]
    DuplicateRoute { name: String },

    /// No route with this name exists in the registry.
    #[error("no route named {name:?}")]
    UnknownRoute { name: String },

    /// The path template could not be parsed at registration time.
    #[error("invalid path template {template:?}: {reason}")]
    InvalidTemplate {
        template: String,
        reason: &'static str,
    },

    /// A URL was built without a binding for one of the template's variables.
    #[error("route {route:?} is missing a value for path variable {name:?}")]
    MissingParameter { route: String, name: String },
}
