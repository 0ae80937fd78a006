//! Tenant relation resolution.
//!
//! Resolution is driven by the entity type on the other end of a relation,
//! never by the field name: one entity may call its tenant relation
//! `company`, another `company_relation`.

use std::collections::BTreeMap;
use tenantry_graph::{EntityRelationships, RelationshipInfo, SchemaGraph};
use tracing::{debug, warn};

use crate::config::TenantConfig;
use crate::error::{ResolveError, ResolveResult};
use crate::relations::{RelationLookup, TenantRelation};

/// Pick the relation on `rels` that connects the entity to `tenant`.
///
/// Owned relations are searched first, inverse relations only when none is
/// owned. An override wins outright and may name either side; the
/// convention only breaks ties between several candidates.
pub fn resolve_relation<'a>(
    rels: &'a EntityRelationships,
    tenant: &str,
    override_field: Option<&str>,
    convention: Option<&str>,
) -> ResolveResult<&'a RelationshipInfo> {
    let entity = rels.entity_name.as_str();

    if let Some(field) = override_field {
        return rels
            .all()
            .find(|r| r.related_entity == tenant && r.field_name == field)
            .ok_or_else(|| ResolveError::invalid_override(entity, tenant, field));
    }

    let mut candidates: Vec<&'a RelationshipInfo> = rels
        .owns
        .iter()
        .filter(|r| r.related_entity == tenant)
        .collect();
    if candidates.is_empty() {
        candidates = rels
            .referenced_by
            .iter()
            .filter(|r| r.related_entity == tenant)
            .collect();
    }

    match candidates.as_slice() {
        [] => Err(ResolveError::no_tenant_relation(entity, tenant)),
        [only] => Ok(*only),
        _ => {
            if let Some(convention) = convention {
                let mut matching = candidates
                    .iter()
                    .copied()
                    .filter(|r| r.owns_foreign_key(convention));
                if let (Some(chosen), None) = (matching.next(), matching.next()) {
                    warn!(
                        entity,
                        tenant,
                        field = %chosen.field_name,
                        convention,
                        "several tenant relations; chose the one owning the conventional key"
                    );
                    return Ok(chosen);
                }
            }
            Err(ResolveError::ambiguous(
                entity,
                tenant,
                candidates.iter().map(|r| r.field_name.clone()).collect(),
            ))
        }
    }
}

/// Resolve the tenant relation field name for one entity.
pub fn resolve_tenant_field(
    rels: &EntityRelationships,
    tenant_entity: &str,
    overrides: Option<&BTreeMap<String, String>>,
) -> ResolveResult<String> {
    let override_field = overrides
        .and_then(|o| o.get(&rels.entity_name))
        .map(String::as_str);
    resolve_relation(rels, tenant_entity, override_field, None).map(|r| r.field_name.clone())
}

/// Resolves tenant relations on demand against a graph and configuration.
#[derive(Debug, Clone, Copy)]
pub struct TenantResolver<'g, 'c> {
    graph: &'g SchemaGraph,
    config: &'c TenantConfig,
}

impl<'g, 'c> TenantResolver<'g, 'c> {
    /// Create a new resolver.
    pub fn new(graph: &'g SchemaGraph, config: &'c TenantConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &'c TenantConfig {
        self.config
    }

    /// Resolve the tenant relation of `entity`.
    ///
    /// Returns `None` for exempt entities (including the tenant itself).
    pub fn resolve(&self, entity: &str) -> ResolveResult<Option<TenantRelation>> {
        let rels = self.graph.require(entity)?;

        if self.config.is_exempt(entity) {
            debug!(entity, "entity is exempt from tenant scoping");
            return Ok(None);
        }

        let info = resolve_relation(
            rels,
            &self.config.tenant_entity,
            self.config.override_for(entity),
            self.config.foreign_key_convention.as_deref(),
        )?;

        debug!(entity, field = %info.field_name, "resolved tenant relation");
        Ok(Some(TenantRelation::from_info(entity, info)))
    }
}

impl RelationLookup for TenantResolver<'_, '_> {
    fn tenant_relation(&self, entity: &str) -> ResolveResult<Option<TenantRelation>> {
        self.resolve(entity)
    }
}
