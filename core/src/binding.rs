//! Tenant binding values.
//!
//! A binding pairs the relation field that scopes an entity with the value
//! written into that field, always of the form `{"connect": {"id": ...}}`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Build the `{"connect": {"id": id}}` value injected at create sites.
pub fn tenant_connect(id: impl Into<String>) -> Value {
    json!({ "connect": { "id": id.into() } })
}

/// Read the tenant id back out of a `{"connect": {"id": ...}}` value.
pub fn connected_id(value: &Value) -> Option<&str> {
    value.get("connect")?.get("id")?.as_str()
}

/// The relation field and value that scope one entity to its tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantBinding {
    /// Relation field on the entity, e.g. `company` or `company_relation`.
    pub relation_field_name: String,
    /// Value written into that field.
    pub value: Value,
}

impl TenantBinding {
    pub fn new(relation_field_name: impl Into<String>, value: Value) -> Self {
        Self {
            relation_field_name: relation_field_name.into(),
            value,
        }
    }

    /// Binding that connects to an existing tenant by id.
    pub fn connect(relation_field_name: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self::new(relation_field_name, tenant_connect(tenant_id))
    }

    /// The tenant id this binding connects to, if it has the connect shape.
    pub fn tenant_id(&self) -> Option<&str> {
        connected_id(&self.value)
    }

    /// Render as the single-key object `{relationFieldName: value}`.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(self.relation_field_name.clone(), self.value.clone());
        Value::Object(map)
    }
}

impl fmt::Display for TenantBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.relation_field_name, self.value)
    }
}
