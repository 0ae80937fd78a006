//! Nested-write operation handlers.
//!
//! One module per data-writing operation. Reference operations (`connect`,
//! `disconnect`, `set`, `updateMany`, `delete`, `deleteMany`) never carry a
//! create site and are copied through in `apply`.

mod connect_or_create;
mod create;
mod update;
mod upsert;

use serde_json::{Map, Value};
use tenantry_resolver::RelationLookup;
use tracing::debug;

use crate::error::MergeResult;
use crate::merger::MutationMerger;
use crate::node::{NestedWrite, Path, Payload};

/// Merge one parsed operation whose writes target `entity`.
pub(crate) fn apply<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    write: NestedWrite<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    match write {
        NestedWrite::Create(payload) => create::merge_create(merger, payload, tenant, entity, path),
        NestedWrite::CreateMany(payload) => {
            create::merge_create_many(merger, payload, tenant, entity, path)
        }
        NestedWrite::ConnectOrCreate(payload) => {
            connect_or_create::merge_connect_or_create(merger, payload, tenant, entity, path)
        }
        NestedWrite::Upsert(payload) => upsert::merge_upsert(merger, payload, tenant, entity, path),
        NestedWrite::Update(payload) => update::merge_update(merger, payload, tenant, entity, path),
        NestedWrite::Reference(_, value) => Ok(value.clone()),
    }
}

/// Apply `f` to a single object or to every object of a list.
///
/// Non-object list elements and malformed payloads are kept as they are.
fn each<F>(payload: Payload<'_>, path: &Path<'_>, mut f: F) -> MergeResult<Value>
where
    F: FnMut(&Map<String, Value>, &Path<'_>) -> MergeResult<Value>,
{
    match payload {
        Payload::One(item) => f(item, path),
        Payload::Many(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => f(map, &path.index(i)),
                other => Ok(other.clone()),
            })
            .collect::<MergeResult<Vec<_>>>()
            .map(Value::Array),
        Payload::Malformed(value) => {
            debug!(%path, "passing through malformed payload");
            Ok(value.clone())
        }
    }
}

/// Copy `item`, rewriting the values under `keys` with `f`.
fn rewrite_keys<F>(
    item: &Map<String, Value>,
    keys: &[&str],
    path: &Path<'_>,
    mut f: F,
) -> MergeResult<Value>
where
    F: FnMut(&Value, &Path<'_>) -> MergeResult<Value>,
{
    let mut merged = Map::with_capacity(item.len());
    for (key, value) in item {
        let value = if keys.contains(&key.as_str()) {
            f(value, &path.key(key))?
        } else {
            value.clone()
        };
        merged.insert(key.clone(), value);
    }
    Ok(Value::Object(merged))
}
