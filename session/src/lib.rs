//! Tenantry Session
//!
//! Builds the schema graph and resolves every tenant relation once, then
//! merges tenant bindings into any number of payloads.

mod error;
mod session;

pub use error::{SessionError, SessionResult};
pub use session::{SchemaDocument, Session};
