//! Error types for route table construction, resolution and view loading

use thiserror::Error;

/// Errors surfaced by the router at navigation time
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouterError {
    /// No route in the table matches the requested path
    #[error("no route matches `{0}`")]
    NotFound(String),

    /// The deferred module behind a route could not be fetched
    #[error("failed to load view for route `{route}`: {reason}")]
    LoadFailure { route: String, reason: String },

    /// The route table itself is malformed
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Fatal problems detected while building a [`crate::RouteTable`]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route with pattern `{0}` has an empty name")]
    EmptyName(String),

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
