//! [`PermissionSource`](backoffice_core::traits::PermissionSource) implementations.

pub mod fixed;
pub mod http;

pub use fixed::StaticPermissionSource;
pub use http::HttpPermissionSource;
