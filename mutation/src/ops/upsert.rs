//! upsert.

use serde_json::Value;
use tenantry_resolver::RelationLookup;

use super::create::merge_create;
use crate::error::MergeResult;
use crate::merger::MutationMerger;
use crate::node::{Path, Payload};

/// Scope the `create` and `update` branches independently.
///
/// Both hold entity data directly, so both are scoped like a create; either
/// may be a list.
pub(super) fn merge_upsert<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    payload: Payload<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    super::each(payload, path, |item, path| {
        super::rewrite_keys(item, &["create", "update"], path, |branch, path| {
            merge_create(merger, Payload::of(branch), tenant, entity, path)
        })
    })
}
