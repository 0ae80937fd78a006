//! GraphBuilder for constructing an immutable SchemaGraph.
//!
//! The builder makes one flat pass over every relation field. It never
//! follows a relation into the related entity, so self-references and
//! longer cycles need no special handling.

use crate::{EntityRelationships, RelationKind, RelationshipInfo, SchemaGraph};
use std::collections::{HashMap, HashSet};
use tenantry_core::{EntityDef, FieldDescriptor};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph construction or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Entity not found: {name}")]
    EntityNotFound { name: String },

    #[error("Duplicate entity name: {name}")]
    DuplicateEntity { name: String },

    #[error("Relation field {entity}.{field} has no related entity")]
    MissingRelationTarget { entity: String, field: String },

    #[error("Relation field {entity}.{field} points at unknown entity {target}")]
    UnknownRelationTarget {
        entity: String,
        field: String,
        target: String,
    },
}

impl GraphError {
    pub fn entity_not_found(name: impl Into<String>) -> Self {
        Self::EntityNotFound { name: name.into() }
    }

    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::DuplicateEntity { name: name.into() }
    }

    pub fn missing_relation_target(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRelationTarget {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn unknown_relation_target(
        entity: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownRelationTarget {
            entity: entity.into(),
            field: field.into(),
            target: target.into(),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Builder for constructing an immutable SchemaGraph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Entities in insertion order.
    entities: Vec<EntityDef>,
    /// Entity name to position in `entities`.
    index: HashMap<String, usize>,
}

impl GraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity definition.
    pub fn add_entity(&mut self, entity: EntityDef) -> GraphResult<&mut Self> {
        if self.index.contains_key(&entity.name) {
            return Err(GraphError::duplicate_entity(entity.name));
        }
        self.index.insert(entity.name.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(self)
    }

    /// Add several entity definitions.
    pub fn add_entities<I>(&mut self, entities: I) -> GraphResult<&mut Self>
    where
        I: IntoIterator<Item = EntityDef>,
    {
        for entity in entities {
            self.add_entity(entity)?;
        }
        Ok(self)
    }

    /// Build the immutable SchemaGraph.
    pub fn build(self) -> GraphResult<SchemaGraph> {
        self.check_relation_targets()?;

        // Every entity gets an entry, related or not
        let mut relationships: Vec<EntityRelationships> = self
            .entities
            .iter()
            .map(|e| EntityRelationships::new(&e.name))
            .collect();

        // (entity position, field name) of inverse fields already paired
        let mut claimed: HashSet<(usize, &str)> = HashSet::new();

        for (position, entity) in self.entities.iter().enumerate() {
            for field in entity.relation_fields() {
                let target = field
                    .target()
                    .ok_or_else(|| GraphError::missing_relation_target(&entity.name, &field.name))?;
                let target_position = *self
                    .index
                    .get(target)
                    .ok_or_else(|| GraphError::entity_not_found(target))?;

                relationships[position]
                    .related_entities
                    .insert(target.to_string());

                if !field.is_owning_side() {
                    continue;
                }

                let mirror = find_mirror(entity, field, &self.entities[target_position], |m| {
                    claimed.contains(&(target_position, m.name.as_str()))
                });
                match mirror {
                    Some(m) => {
                        claimed.insert((target_position, m.name.as_str()));
                    }
                    None => debug!(
                        entity = %entity.name,
                        field = %field.name,
                        "owning field has no unclaimed inverse"
                    ),
                }

                relationships[position].owns.push(RelationshipInfo {
                    field_name: field.name.clone(),
                    related_entity: target.to_string(),
                    kind: RelationKind::classify(true, field.is_list),
                    is_required: field.is_required,
                    is_owning_side: true,
                    foreign_keys: Some(field.foreign_keys().to_vec()),
                    back_reference_field: mirror.map(|m| m.name.clone()),
                });

                if let Some(mirror) = mirror {
                    let reverse = &mut relationships[target_position];
                    reverse.referenced_by.push(RelationshipInfo {
                        field_name: mirror.name.clone(),
                        related_entity: entity.name.clone(),
                        kind: RelationKind::classify(false, mirror.is_list),
                        is_required: mirror.is_required,
                        is_owning_side: false,
                        foreign_keys: None,
                        back_reference_field: Some(field.name.clone()),
                    });
                    reverse.related_entities.insert(entity.name.clone());
                }
            }
        }

        for rels in &relationships {
            debug!(
                entity = %rels.entity_name,
                owns = rels.owns.len(),
                referenced_by = rels.referenced_by.len(),
                "built entity relationships"
            );
        }

        Ok(SchemaGraph::new(self.entities, self.index, relationships))
    }

    /// Every relation field must name an entity present in the input.
    fn check_relation_targets(&self) -> GraphResult<()> {
        for entity in &self.entities {
            for field in entity.relation_fields() {
                match field.target() {
                    None => {
                        return Err(GraphError::missing_relation_target(
                            &entity.name,
                            &field.name,
                        ))
                    }
                    Some(target) if !self.index.contains_key(target) => {
                        return Err(GraphError::unknown_relation_target(
                            &entity.name,
                            &field.name,
                            target,
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

/// Locate the field on `related` that forms the other half of `field`.
///
/// The mirror points back at `entity` and shares the relation identifier.
/// For self-relations it is a different field. A field already paired with
/// another owning field (`is_claimed`) is skipped.
fn find_mirror<'a, C>(
    entity: &EntityDef,
    field: &FieldDescriptor,
    related: &'a EntityDef,
    is_claimed: C,
) -> Option<&'a FieldDescriptor>
where
    C: Fn(&'a FieldDescriptor) -> bool,
{
    let self_relation = related.name == entity.name;
    related.relation_fields().find(|candidate| {
        candidate.target() == Some(entity.name.as_str())
            && candidate.relation_name == field.relation_name
            && !(self_relation && candidate.name == field.name)
            && !is_claimed(*candidate)
    })
}
