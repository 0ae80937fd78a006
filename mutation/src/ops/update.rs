//! update.
//!
//! A list update is a list of `{ where, data }` wrappers, and the binding
//! always goes inside `data`, never onto the wrapper. A single update is
//! either one such wrapper or, on a to-one relation, the data itself.
//! When the entity declares its own `data` field, only an object that also
//! carries `where` is a wrapper.

use serde_json::{Map, Value};
use tenantry_resolver::RelationLookup;
use tracing::debug;

use crate::error::MergeResult;
use crate::merger::MutationMerger;
use crate::node::{is_where_data, Path, Payload};

pub(super) fn merge_update<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    payload: Payload<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    match payload {
        Payload::One(item) if is_wrapper(merger, item, entity) => {
            merge_wrapper(merger, item, tenant, entity, path)
        }
        Payload::One(data) => merger.merge_record(data, tenant, entity, path),
        Payload::Many(_) => super::each(payload, path, |item, path| {
            if is_wrapper(merger, item, entity) {
                merge_wrapper(merger, item, tenant, entity, path)
            } else {
                debug!(%path, "list update item is not a where/data wrapper");
                Ok(Value::Object(item.clone()))
            }
        }),
        Payload::Malformed(value) => {
            debug!(%path, "passing through malformed update");
            Ok(value.clone())
        }
    }
}

fn is_wrapper<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    item: &Map<String, Value>,
    entity: &str,
) -> bool {
    is_where_data(item)
        && (item.contains_key("where") || merger.graph().field(entity, "data").is_none())
}

fn merge_wrapper<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    wrapper: &Map<String, Value>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    super::rewrite_keys(wrapper, &["data"], path, |data, path| {
        merger.merge_entity(data, tenant, entity, path)
    })
}
