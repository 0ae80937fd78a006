//! Tenantry Schema Graph
//!
//! Derives the bidirectional relationship graph from entity definitions.
//! The graph is immutable after construction via GraphBuilder.

mod builder;
mod graph;
mod types;

pub use builder::{GraphBuilder, GraphError, GraphResult};
pub use graph::SchemaGraph;
pub use types::*;
