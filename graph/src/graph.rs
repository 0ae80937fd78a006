//! The SchemaGraph - immutable relationship lookup.

use crate::{EntityRelationships, GraphBuilder, GraphError, GraphResult};
use std::collections::HashMap;
use tenantry_core::{EntityDef, FieldDescriptor};

/// Entity definitions and their derived relationships, keyed by name.
///
/// Relations are stored as entity names rather than references, so cyclic
/// schemas never produce cyclic data. Immutable after construction; share it
/// freely between threads.
#[derive(Debug, Default)]
pub struct SchemaGraph {
    /// Entity definitions in input order.
    entities: Vec<EntityDef>,
    /// Entity name to position.
    index: HashMap<String, usize>,
    /// Relationships, parallel to `entities`.
    relationships: Vec<EntityRelationships>,
}

impl SchemaGraph {
    /// Create a graph (use GraphBuilder for construction).
    pub(crate) fn new(
        entities: Vec<EntityDef>,
        index: HashMap<String, usize>,
        relationships: Vec<EntityRelationships>,
    ) -> Self {
        Self {
            entities,
            index,
            relationships,
        }
    }

    /// Build a graph from a flat list of entity definitions.
    pub fn build<I>(entities: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = EntityDef>,
    {
        let mut builder = GraphBuilder::new();
        builder.add_entities(entities)?;
        builder.build()
    }

    // ==================== Entity Lookups ====================

    /// Get an entity definition by name.
    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    /// Check whether an entity exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entity names in input order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ==================== Field Lookups ====================

    /// Get a declared field on an entity.
    pub fn field(&self, entity: &str, field: &str) -> Option<&FieldDescriptor> {
        self.entity(entity).and_then(|e| e.get_field(field))
    }

    /// Entity on the other end of a declared relation field.
    ///
    /// Answers for every relation field, including those recorded on
    /// neither side of the relationship table (implicit many-to-many).
    pub fn related_entity(&self, entity: &str, field: &str) -> Option<&str> {
        self.field(entity, field).and_then(|f| f.target())
    }

    // ==================== Relationship Lookups ====================

    /// Get the relationships of an entity.
    pub fn relationships(&self, name: &str) -> Option<&EntityRelationships> {
        self.index.get(name).map(|&i| &self.relationships[i])
    }

    /// Get the relationships of an entity, failing if it does not exist.
    pub fn require(&self, name: &str) -> GraphResult<&EntityRelationships> {
        self.relationships(name)
            .ok_or_else(|| GraphError::entity_not_found(name))
    }

    /// All relationship entries in input order.
    pub fn all_relationships(&self) -> impl Iterator<Item = &EntityRelationships> {
        self.relationships.iter()
    }

    /// Copy out the relationships as a map keyed by entity name.
    pub fn to_map(&self) -> HashMap<String, EntityRelationships> {
        self.relationships
            .iter()
            .map(|r| (r.entity_name.clone(), r.clone()))
            .collect()
    }
}
