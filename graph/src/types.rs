//! Relationship types derived from entity definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Cardinality of a relation as seen from the side that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    /// Classify from whether the side owns a foreign key and holds a list.
    pub fn classify(is_owning_side: bool, is_list: bool) -> Self {
        match (is_owning_side, is_list) {
            (true, true) => RelationKind::ManyToMany,
            (true, false) => RelationKind::ManyToOne,
            (false, true) => RelationKind::OneToMany,
            (false, false) => RelationKind::OneToOne,
        }
    }

    /// Whether this side of the relation holds many related records.
    pub fn is_to_many(self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One relation, as seen from one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipInfo {
    /// Field on this entity that holds the relation.
    pub field_name: String,
    /// Entity on the other end.
    pub related_entity: String,
    pub kind: RelationKind,
    pub is_required: bool,
    /// Whether this entity stores the foreign key.
    pub is_owning_side: bool,
    /// Foreign key columns stored by the owning side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<String>>,
    /// Field on the related entity that points back here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_reference_field: Option<String>,
}

impl RelationshipInfo {
    /// Foreign keys stored by this side (empty for the inverse side).
    pub fn foreign_keys(&self) -> &[String] {
        self.foreign_keys.as_deref().unwrap_or_default()
    }

    /// Whether this side stores `column` as one of its foreign keys.
    pub fn owns_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys().iter().any(|fk| fk == column)
    }
}

/// All relations touching one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRelationships {
    pub entity_name: String,
    /// Relations this entity holds the foreign key for.
    pub owns: Vec<RelationshipInfo>,
    /// Mirror images of other entities' owning relations.
    pub referenced_by: Vec<RelationshipInfo>,
    /// Every entity this one is connected to, in either direction.
    pub related_entities: BTreeSet<String>,
}

impl EntityRelationships {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            ..Self::default()
        }
    }

    /// Find a relation by field name on either side.
    pub fn find(&self, field_name: &str) -> Option<&RelationshipInfo> {
        self.all().find(|r| r.field_name == field_name)
    }

    /// Owned relations whose other end is `entity`.
    pub fn owned_to<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a RelationshipInfo> {
        self.owns.iter().filter(move |r| r.related_entity == entity)
    }

    /// Inverse relations whose other end is `entity`.
    pub fn referenced_to<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a RelationshipInfo> {
        self.referenced_by
            .iter()
            .filter(move |r| r.related_entity == entity)
    }

    /// All relations (owned first) whose other end is `entity`.
    pub fn relations_to<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a RelationshipInfo> {
        self.owned_to(entity).chain(self.referenced_to(entity))
    }

    /// Owned then inverse relations.
    pub fn all(&self) -> impl Iterator<Item = &RelationshipInfo> {
        self.owns.iter().chain(self.referenced_by.iter())
    }

    /// Returns true if the entity takes part in no relation.
    pub fn is_isolated(&self) -> bool {
        self.owns.is_empty() && self.referenced_by.is_empty() && self.related_entities.is_empty()
    }
}
