//! connectOrCreate.
//!
//! `where` identifies an existing record and is never scoped; only the
//! `create` branch is.

use serde_json::Value;
use tenantry_resolver::RelationLookup;

use super::create::merge_create;
use crate::error::MergeResult;
use crate::merger::MutationMerger;
use crate::node::{Path, Payload};

pub(super) fn merge_connect_or_create<L: RelationLookup>(
    merger: &MutationMerger<'_, L>,
    payload: Payload<'_>,
    tenant: &Value,
    entity: &str,
    path: &Path<'_>,
) -> MergeResult<Value> {
    super::each(payload, path, |item, path| {
        super::rewrite_keys(item, &["create"], path, |create, path| {
            merge_create(merger, Payload::of(create), tenant, entity, path)
        })
    })
}
