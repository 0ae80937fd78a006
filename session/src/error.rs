//! Session error types.

use tenantry_graph::GraphError;
use tenantry_mutation::MergeError;
use tenantry_resolver::ResolveError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Schema graph error.
    #[error("schema error: {0}")]
    Graph(#[from] GraphError),

    /// Resolution error.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Merge error.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// Unparseable schema document.
    #[error("invalid schema: {message}")]
    Schema { message: String },

    /// Unparseable or inconsistent configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SessionError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for schema/configuration defects, false for caller bugs.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Graph(GraphError::EntityNotFound { .. }) => false,
            Self::Graph(_) | Self::Schema { .. } | Self::Config { .. } => true,
            Self::Resolve(e) => e.is_configuration(),
            Self::Merge(e) => e.is_configuration(),
        }
    }
}
