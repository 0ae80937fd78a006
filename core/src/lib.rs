//! Tenantry Core Types
//!
//! Foundational types shared by every Tenantry crate:
//! - Entity definitions (EntityDef, FieldDescriptor)
//! - Tenant bindings (TenantBinding and the connect value helpers)

mod binding;
mod entity;

pub use binding::*;
pub use entity::*;
