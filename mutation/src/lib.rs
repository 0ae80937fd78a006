//! Tenantry Mutation
//!
//! Merge tenant bindings into nested-write payloads.
//!
//! Responsibilities:
//! - Classify untyped payload values by their reserved operation keys
//! - Inject each entity's own tenant relation at every create site
//! - Leave references (`connect`, `set`, ...) and `where` clauses untouched
//! - Surface resolution failures with the payload path of the failing site
//!
//! # Module Structure
//!
//! - `merger` - Main MutationMerger that walks a payload
//! - `ops/` - Per-operation handlers (create, createMany, connectOrCreate, upsert, update)
//! - `node` - Shape classification and the `NestedWrite` grammar
//! - `error` - Error types for merge failures

mod error;
mod merger;
mod node;
mod ops;

#[cfg(test)]
mod proptests;

pub use error::{MergeError, MergeResult};
pub use merger::MutationMerger;
pub use node::{has_operations, is_where_data, MutationNode, NestedWrite, Operation, Payload};
