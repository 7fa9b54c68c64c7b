//! Guarded route table and role landing pages.

pub mod roles;
pub mod table;

pub use roles::{RoleDefaultMap, normalize_role};
pub use table::{RouteDescriptor, RouteTable};
