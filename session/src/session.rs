//! Session - one schema, one configuration, many merges.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tenantry_core::{tenant_connect, EntityDef, TenantBinding};
use tenantry_graph::SchemaGraph;
use tenantry_mutation::MutationMerger;
use tenantry_resolver::{
    RelationLookup, ResolveError, ResolvedRelations, TenantConfig, TenantRelation,
};
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

/// A schema as it arrives in JSON: a bare entity list or `{ "entities": [..] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaDocument {
    Entities(Vec<EntityDef>),
    Wrapped { entities: Vec<EntityDef> },
}

impl SchemaDocument {
    pub fn into_entities(self) -> Vec<EntityDef> {
        match self {
            SchemaDocument::Entities(entities) | SchemaDocument::Wrapped { entities } => entities,
        }
    }
}

/// A built schema graph with every tenant relation resolved.
///
/// Immutable after construction; merges only read it.
#[derive(Debug)]
pub struct Session {
    graph: SchemaGraph,
    config: TenantConfig,
    relations: ResolvedRelations,
}

impl Session {
    /// Build the graph and resolve every entity.
    ///
    /// Fails when the graph cannot be built or the tenant entity is not part
    /// of the schema. Per-entity resolution failures are kept and reported
    /// by `validate` or by the merge that reaches them.
    pub fn new<I>(entities: I, config: TenantConfig) -> SessionResult<Self>
    where
        I: IntoIterator<Item = EntityDef>,
    {
        let graph = SchemaGraph::build(entities)?;

        if !graph.contains(&config.tenant_entity) {
            return Err(SessionError::config(format!(
                "tenant entity {} is not in the schema",
                config.tenant_entity
            )));
        }
        for entity in config.overrides.keys().chain(config.exempt.iter()) {
            if !graph.contains(entity) {
                warn!(entity = %entity, "configuration names an entity that is not in the schema");
            }
        }

        let relations = ResolvedRelations::build(&graph, &config);
        debug!(
            entities = graph.len(),
            scoped = relations.scoped_count(),
            tenant = %config.tenant_entity,
            "session ready"
        );

        Ok(Self {
            graph,
            config,
            relations,
        })
    }

    /// Build a session from a JSON schema document and a JSON configuration.
    pub fn from_json(schema_json: &str, config_json: &str) -> SessionResult<Self> {
        let schema: SchemaDocument =
            serde_json::from_str(schema_json).map_err(|e| SessionError::schema(e.to_string()))?;
        let config =
            TenantConfig::from_json(config_json).map_err(|e| SessionError::config(e.to_string()))?;
        Self::new(schema.into_entities(), config)
    }

    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    pub fn config(&self) -> &TenantConfig {
        &self.config
    }

    pub fn relations(&self) -> &ResolvedRelations {
        &self.relations
    }

    /// The relation that scopes `entity`, or `None` when it is exempt.
    pub fn tenant_relation(&self, entity: &str) -> SessionResult<Option<TenantRelation>> {
        Ok(self.relations.tenant_relation(entity)?)
    }

    /// The binding that connects `entity` to tenant `tenant_id`.
    ///
    /// Returns `None` for exempt entities.
    pub fn binding_for(&self, entity: &str, tenant_id: &str) -> SessionResult<Option<TenantBinding>> {
        Ok(self
            .tenant_relation(entity)?
            .map(|relation| relation.binding(tenant_connect(tenant_id))))
    }

    /// A merger over this session's graph and relations.
    pub fn merger(&self) -> MutationMerger<'_, &ResolvedRelations> {
        MutationMerger::new(&self.graph, &self.relations)
    }

    /// Scope every create site of `tree` to tenant `tenant_id`.
    pub fn merge(&self, tree: &Value, tenant_id: &str, root_entity: &str) -> SessionResult<Value> {
        self.merge_value(tree, &tenant_connect(tenant_id), root_entity)
    }

    /// Like `merge`, with a caller-built tenant value.
    pub fn merge_value(&self, tree: &Value, tenant: &Value, root_entity: &str) -> SessionResult<Value> {
        Ok(self.merger().merge(tree, tenant, root_entity)?)
    }

    /// Every configuration error, in schema order.
    pub fn validate(&self) -> Vec<ResolveError> {
        self.relations.errors().cloned().collect()
    }
}
