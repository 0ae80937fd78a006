//! Resolved tenant relations and the lookup seam used by the merger.

use serde_json::Value;
use std::collections::HashMap;
use tenantry_core::TenantBinding;
use tenantry_graph::{RelationshipInfo, SchemaGraph};

use crate::config::TenantConfig;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::TenantResolver;

/// The relation that scopes one entity to its tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRelation {
    /// Entity the relation belongs to.
    pub entity: String,
    /// Relation field to inject at create sites.
    pub field_name: String,
    /// Scalar foreign keys behind the relation, if this side owns them.
    pub foreign_keys: Vec<String>,
}

impl TenantRelation {
    pub(crate) fn from_info(entity: &str, info: &RelationshipInfo) -> Self {
        Self {
            entity: entity.to_string(),
            field_name: info.field_name.clone(),
            foreign_keys: info.foreign_keys().to_vec(),
        }
    }

    /// Whether `key` already binds the tenant: the relation field itself or
    /// one of its scalar foreign keys.
    pub fn is_bound_by(&self, key: &str) -> bool {
        self.field_name == key || self.foreign_keys.iter().any(|fk| fk == key)
    }

    /// The binding for a given tenant value.
    pub fn binding(&self, value: Value) -> TenantBinding {
        TenantBinding::new(&self.field_name, value)
    }
}

/// Per-entity tenant relation lookup.
///
/// `Ok(None)` means the entity is exempt from scoping.
pub trait RelationLookup {
    fn tenant_relation(&self, entity: &str) -> ResolveResult<Option<TenantRelation>>;
}

impl<L: RelationLookup + ?Sized> RelationLookup for &L {
    fn tenant_relation(&self, entity: &str) -> ResolveResult<Option<TenantRelation>> {
        (**self).tenant_relation(entity)
    }
}

/// Tenant relations resolved once for every entity in a graph.
///
/// Failed resolutions are kept and returned whenever that entity is looked
/// up, so a configuration defect surfaces at the site that needs it.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRelations {
    outcomes: HashMap<String, ResolveResult<Option<TenantRelation>>>,
    /// Entity names in graph order.
    order: Vec<String>,
}

impl ResolvedRelations {
    /// Resolve every entity of `graph`.
    pub fn build(graph: &SchemaGraph, config: &TenantConfig) -> Self {
        let resolver = TenantResolver::new(graph, config);
        let mut outcomes = HashMap::with_capacity(graph.len());
        let mut order = Vec::with_capacity(graph.len());

        for name in graph.entity_names() {
            outcomes.insert(name.to_string(), resolver.resolve(name));
            order.push(name.to_string());
        }

        Self { outcomes, order }
    }

    /// Resolved relation of an entity, if it resolved and is scoped.
    pub fn get(&self, entity: &str) -> Option<&TenantRelation> {
        match self.outcomes.get(entity) {
            Some(Ok(Some(relation))) => Some(relation),
            _ => None,
        }
    }

    /// Resolution failures in graph order.
    pub fn errors(&self) -> impl Iterator<Item = &ResolveError> {
        self.order
            .iter()
            .filter_map(|name| self.outcomes.get(name))
            .filter_map(|outcome| outcome.as_ref().err())
    }

    /// Number of entities that resolved to a tenant relation.
    pub fn scoped_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, Ok(Some(_))))
            .count()
    }
}

impl RelationLookup for ResolvedRelations {
    fn tenant_relation(&self, entity: &str) -> ResolveResult<Option<TenantRelation>> {
        self.outcomes
            .get(entity)
            .cloned()
            .unwrap_or_else(|| Err(ResolveError::entity_not_found(entity)))
    }
}
