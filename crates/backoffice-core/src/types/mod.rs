//! Shared domain types used across crates.

pub mod capability;
pub mod permission;
pub mod user;

pub use capability::{Capability, CapabilityCodes};
pub use permission::{PermissionGrant, PermissionPayload};
pub use user::StoredUser;
