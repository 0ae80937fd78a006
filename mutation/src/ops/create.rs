//! create and createMany.

use serde_json::{Map, Value};
use tenantry_resolver::RelationLookup;
use tracing::debug;

use crate::error::MergeResult;
use crate::merger::MutationMerger;
use crate::node::{Path, Payload};

/// Scope one created object, or each object of a list.
pub(super) fn merge_create<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    payload: Payload<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    super::each(payload, path, |data, path| {
        merger.merge_record(data, tenant, entity, path)
    })
}

/// Scope every item of `createMany.data`.
///
/// A single `data` object is normalized to a one-element list; other
/// envelope keys such as `skipDuplicates` are kept.
pub(super) fn merge_create_many<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    payload: Payload<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    let Payload::One(envelope) = payload else {
        debug!(%path, "createMany is not an object");
        return Ok(payload.to_value());
    };

    let mut merged = Map::with_capacity(envelope.len());
    for (key, value) in envelope {
        let value = if key == "data" {
            let data_path = path.key(key);
            match value {
                Value::Object(item) => {
                    let one = merger.merge_record(item, tenant, entity, &data_path.index(0))?;
                    Value::Array(vec![one])
                }
                Value::Array(_) => merge_create(merger, Payload::of(value), tenant, entity, &data_path)?,
                other => {
                    debug!(path = %data_path, "createMany.data is neither an object nor a list");
                    other.clone()
                }
            }
        } else {
            value.clone()
        };
        merged.insert(key.clone(), value);
    }
    Ok(Value::Object(merged))
}
