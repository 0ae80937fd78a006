//! Entity definitions consumed by the schema graph.
//!
//! An entity is a name plus an ordered list of fields. Relation fields name
//! the entity they point at and, on the owning side, the foreign key
//! columns they carry.

use serde::{Deserialize, Serialize};

/// A single field on an entity definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name as it appears in mutation payloads.
    pub name: String,
    /// Whether this field points at another entity.
    #[serde(default)]
    pub is_relation: bool,
    /// Name of the related entity (relation fields only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<String>,
    /// Whether the field holds many values.
    #[serde(default)]
    pub is_list: bool,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub is_required: bool,
    /// Relation identifier shared by both sides of a relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_name: Option<String>,
    /// Foreign key columns this side stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_foreign_keys: Option<Vec<String>>,
}

impl FieldDescriptor {
    /// Create a scalar field.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_relation: false,
            related_entity: None,
            is_list: false,
            is_required: false,
            relation_name: None,
            owned_foreign_keys: None,
        }
    }

    /// Create a relation field pointing at `related_entity`.
    pub fn relation(name: impl Into<String>, related_entity: impl Into<String>) -> Self {
        Self {
            is_relation: true,
            related_entity: Some(related_entity.into()),
            ..Self::scalar(name)
        }
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn named(mut self, relation_name: impl Into<String>) -> Self {
        self.relation_name = Some(relation_name.into());
        self
    }

    /// Mark this side as the owner of the given foreign key columns.
    pub fn owns<I, S>(mut self, foreign_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owned_foreign_keys = Some(foreign_keys.into_iter().map(Into::into).collect());
        self
    }

    /// Foreign keys carried by this field (empty when none).
    pub fn foreign_keys(&self) -> &[String] {
        self.owned_foreign_keys.as_deref().unwrap_or_default()
    }

    /// A field is the owning side when it carries at least one foreign key.
    pub fn is_owning_side(&self) -> bool {
        self.is_relation && !self.foreign_keys().is_empty()
    }

    /// Related entity name, if this is a relation field.
    pub fn target(&self) -> Option<&str> {
        if self.is_relation {
            self.related_entity.as_deref()
        } else {
            None
        }
    }
}

/// An entity definition: a name and its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate over relation fields in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation)
    }
}
