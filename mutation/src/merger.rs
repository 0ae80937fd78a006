//! Mutation merger - walks a nested-write payload and scopes every create site.
//!
//! The merger classifies each field value and delegates operation keys to
//! the handlers in `ops/`:
//! - `ops/create.rs` - create and createMany
//! - `ops/connect_or_create.rs` - connectOrCreate
//! - `ops/upsert.rs` - upsert
//! - `ops/update.rs` - update (`{ where, data }` wrappers and to-one data)
//!
//! Inputs are never mutated; every call returns a fresh tree.

use serde_json::{Map, Value};
use tenantry_core::{tenant_connect, FieldDescriptor};
use tenantry_graph::SchemaGraph;
use tenantry_resolver::RelationLookup;
use tracing::{debug, trace};

use crate::error::{MergeError, MergeResult};
use crate::node::{has_operations, MutationNode, NestedWrite, Operation, Path};
use crate::ops;

/// Injects tenant bindings into nested-write payloads.
#[derive(Debug, Clone)]
pub struct MutationMerger<'g, L> {
    graph: &'g SchemaGraph,
    relations: L,
}

impl<'g, L: RelationLookup> MutationMerger<'g, L> {
    /// Create a new merger.
    pub fn new(graph: &'g SchemaGraph, relations: L) -> Self {
        Self { graph, relations }
    }

    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    /// Merge `tenant` into `node`, an entity payload of type `entity`.
    ///
    /// A root made only of operation keys (e.g. `{ "create": {..} }`) is read
    /// as operations on `entity` itself.
    pub fn merge(&self, node: &Value, tenant: &Value, entity: &str) -> MergeResult<Value> {
        let root = Path::root();
        match node {
            Value::Object(map) if self.is_operations_root(map, entity) => {
                self.merge_operations(map, tenant, entity, None, &root)
            }
            _ => self.merge_entity(node, tenant, entity, &root),
        }
    }

    /// Merge a `{"connect": {"id": tenant_id}}` binding into `node`.
    pub fn merge_id(&self, node: &Value, tenant_id: &str, entity: &str) -> MergeResult<Value> {
        self.merge(node, &tenant_connect(tenant_id), entity)
    }

    fn is_operations_root(&self, map: &Map<String, Value>, entity: &str) -> bool {
        has_operations(map) && map.keys().all(|key| self.graph.field(entity, key).is_none())
    }

    // ==================== Entity Payloads ====================

    /// Merge an entity payload; anything but an object is returned as-is.
    pub(crate) fn merge_entity(
        &self,
        node: &Value,
        tenant: &Value,
        entity: &str,
        path: &Path<'_>,
    ) -> MergeResult<Value> {
        match node {
            Value::Object(fields) => self.merge_record(fields, tenant, entity, path),
            other => Ok(other.clone()),
        }
    }

    /// Merge the fields of one entity payload and bind it to the tenant.
    pub(crate) fn merge_record(
        &self,
        fields: &Map<String, Value>,
        tenant: &Value,
        entity: &str,
        path: &Path<'_>,
    ) -> MergeResult<Value> {
        let relation = self
            .relations
            .tenant_relation(entity)
            .map_err(|e| MergeError::unresolved(path.to_string(), e))?;

        let mut merged = Map::with_capacity(fields.len() + 1);
        for (key, value) in fields {
            let value = self.merge_field(entity, key, value, tenant, &path.key(key))?;
            merged.insert(key.clone(), value);
        }

        if let Some(relation) = relation {
            if fields.keys().any(|key| relation.is_bound_by(key)) {
                trace!(entity, %path, "tenant already bound");
            } else {
                trace!(entity, field = %relation.field_name, %path, "injecting tenant binding");
                merged.insert(relation.field_name, tenant.clone());
            }
        }

        Ok(Value::Object(merged))
    }

    fn merge_field(
        &self,
        entity: &str,
        key: &str,
        value: &Value,
        tenant: &Value,
        path: &Path<'_>,
    ) -> MergeResult<Value> {
        let ops = match MutationNode::classify(value) {
            MutationNode::Operations(ops) => ops,
            // Arrays outside an operation key are field values, not writes.
            MutationNode::List(_) | MutationNode::Record(_) | MutationNode::Scalar(_) => {
                return Ok(value.clone())
            }
        };

        match self.graph.field(entity, key) {
            // Declared scalars (JSON columns) are never nested writes.
            Some(field) if !field.is_relation => Ok(value.clone()),
            Some(field) => {
                let related = field.target().unwrap_or(entity);
                self.merge_operations(ops, tenant, related, Some(field), path)
            }
            None => {
                debug!(entity, key, %path, "undeclared key carries operations; keeping entity context");
                self.merge_operations(ops, tenant, entity, None, path)
            }
        }
    }

    // ==================== Operations ====================

    /// Merge an operations object whose writes target `entity`.
    pub(crate) fn merge_operations(
        &self,
        ops: &Map<String, Value>,
        tenant: &Value,
        entity: &str,
        field: Option<&FieldDescriptor>,
        path: &Path<'_>,
    ) -> MergeResult<Value> {
        let mut merged = Map::with_capacity(ops.len());
        for (key, value) in ops {
            let value = match Operation::from_key(key) {
                Some(op) => {
                    let write = NestedWrite::parse(op, value);
                    if let Some(field) = field {
                        check_cardinality(field, op, &write);
                    }
                    ops::apply(self, write, tenant, entity, &path.key(key))?
                }
                None => value.clone(),
            };
            merged.insert(key.clone(), value);
        }
        Ok(Value::Object(merged))
    }
}

/// Shape wins over declared cardinality; a mismatch is only logged.
fn check_cardinality(field: &FieldDescriptor, op: Operation, write: &NestedWrite<'_>) {
    if !matches!(op, Operation::Create | Operation::Update) {
        return;
    }
    if let Some(payload) = write.payload() {
        if payload.is_many() && !field.is_list {
            debug!(field = %field.name, %op, "list payload on a to-one relation");
        }
    }
}
