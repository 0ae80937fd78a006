//! Resolver error types.

use tenantry_graph::GraphError;
use thiserror::Error;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving tenant relations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Entity {entity} has no relation to tenant entity {tenant}")]
    NoTenantRelation { entity: String, tenant: String },

    #[error(
        "Entity {entity} has several relations to tenant entity {tenant} ({}); configure an override",
        .candidates.join(", ")
    )]
    AmbiguousTenantRelation {
        entity: String,
        tenant: String,
        candidates: Vec<String>,
    },

    #[error("Override {entity}.{field} is not a relation to tenant entity {tenant}")]
    InvalidOverride {
        entity: String,
        tenant: String,
        field: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ResolveError {
    pub fn no_tenant_relation(entity: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self::NoTenantRelation {
            entity: entity.into(),
            tenant: tenant.into(),
        }
    }

    pub fn ambiguous(
        entity: impl Into<String>,
        tenant: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        Self::AmbiguousTenantRelation {
            entity: entity.into(),
            tenant: tenant.into(),
            candidates,
        }
    }

    pub fn invalid_override(
        entity: impl Into<String>,
        tenant: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::InvalidOverride {
            entity: entity.into(),
            tenant: tenant.into(),
            field: field.into(),
        }
    }

    pub fn entity_not_found(name: impl Into<String>) -> Self {
        Self::Graph(GraphError::entity_not_found(name))
    }

    /// True for schema/configuration defects, false for caller bugs.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Graph(_))
    }

    /// Entity the error is about.
    pub fn entity(&self) -> &str {
        match self {
            Self::NoTenantRelation { entity, .. }
            | Self::AmbiguousTenantRelation { entity, .. }
            | Self::InvalidOverride { entity, .. } => entity,
            Self::Graph(GraphError::EntityNotFound { name })
            | Self::Graph(GraphError::DuplicateEntity { name }) => name,
            Self::Graph(GraphError::MissingRelationTarget { entity, .. })
            | Self::Graph(GraphError::UnknownRelationTarget { entity, .. }) => entity,
        }
    }
}
