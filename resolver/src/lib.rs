//! Tenantry Resolver
//!
//! Resolves, for every entity, the relation field that connects it to the
//! designated tenant entity.
//!
//! # Module Structure
//!
//! - `config` - TenantConfig (tenant entity, key convention, overrides, exemptions)
//! - `resolver` - Resolution rules and the on-demand TenantResolver
//! - `relations` - TenantRelation, the RelationLookup seam and the cached table
//! - `error` - Error types for resolution failures

mod config;
mod error;
mod relations;
mod resolver;

pub use config::TenantConfig;
pub use error::{ResolveError, ResolveResult};
pub use relations::{RelationLookup, ResolvedRelations, TenantRelation};
pub use resolver::{resolve_relation, resolve_tenant_field, TenantResolver};
