//! Tenant scoping configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How entities are scoped to their tenant.
///
/// Supplied by the surrounding generator and threaded explicitly through
/// every resolver call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    /// Entity that represents the isolation boundary (e.g. `Company`).
    pub tenant_entity: String,
    /// Canonical foreign key name used to break ties (e.g. `companyId`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_convention: Option<String>,
    /// Explicit relation field per entity, for entities with several
    /// relations to the tenant.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
    /// Entities that are never scoped.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exempt: BTreeSet<String>,
}

impl TenantConfig {
    pub fn new(tenant_entity: impl Into<String>) -> Self {
        Self {
            tenant_entity: tenant_entity.into(),
            foreign_key_convention: None,
            overrides: BTreeMap::new(),
            exempt: BTreeSet::new(),
        }
    }

    pub fn with_convention(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key_convention = Some(foreign_key.into());
        self
    }

    pub fn with_override(mut self, entity: impl Into<String>, field: impl Into<String>) -> Self {
        self.overrides.insert(entity.into(), field.into());
        self
    }

    pub fn exempt(mut self, entity: impl Into<String>) -> Self {
        self.exempt.insert(entity.into());
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Configured relation field for an entity, if any.
    pub fn override_for(&self, entity: &str) -> Option<&str> {
        self.overrides.get(entity).map(String::as_str)
    }

    /// The tenant entity itself is always exempt.
    pub fn is_exempt(&self, entity: &str) -> bool {
        entity == self.tenant_entity || self.exempt.contains(entity)
    }
}
