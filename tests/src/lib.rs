//! Tenantry Integration Test Framework
//!
//! Provides a fluent API for fixture-driven merge tests.
//!
//! # Structure
//!
//! Each fixture domain under `fixtures/` holds:
//!
//! - **schema.json** - Entity definitions for the domain
//! - **config*.json** - Tenant configurations
//! - **mutations/** - Named merge cases (input plus expected tree or error)
//!
//! Scenarios (Rust) pick a schema, a configuration and a cases file, then
//! assert on individual cases.
//!
//! # Example
//!
//! ```ignore
//! use tenantry_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("create")
//!         .schema("todo/schema.json")
//!         .config("todo/config.json")
//!         .cases("todo/mutations/create.json")
//!         .step("per_entity_relation_names", |a| {
//!             a.expected().unbound("/tags/create", "company")
//!         })
//!         .all_cases()
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod error;
mod runner;

pub use assertion::{Assertion, AssertionBuilder, Check};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::{Case, Cases};
pub use scenario::{fixtures_root, Scenario};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::Scenario;
}
