//! Merge error types.

use tenantry_resolver::ResolveError;
use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while merging tenant bindings into a payload.
///
/// Malformed fragments never fail a merge; only resolution failures at a
/// site that needs a binding do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Cannot scope {path}: {source}")]
    Unresolved { path: String, source: ResolveError },
}

impl MergeError {
    pub fn unresolved(path: impl Into<String>, source: ResolveError) -> Self {
        Self::Unresolved {
            path: path.into(),
            source,
        }
    }

    /// Payload location of the failing site.
    pub fn path(&self) -> &str {
        match self {
            Self::Unresolved { path, .. } => path,
        }
    }

    pub fn resolve_error(&self) -> &ResolveError {
        match self {
            Self::Unresolved { source, .. } => source,
        }
    }

    /// True for schema/configuration defects, false for caller bugs.
    pub fn is_configuration(&self) -> bool {
        self.resolve_error().is_configuration()
    }
}

impl From<ResolveError> for MergeError {
    fn from(source: ResolveError) -> Self {
        Self::unresolved("$", source)
    }
}
