//! Collaborator traits implemented outside this crate.
//!
//! - [`PermissionSource`] fetches a role's permission payload from the backend
//! - [`SessionStore`] persists the access token and user blob on the client

pub mod permission_source;
pub mod session_store;

pub use permission_source::PermissionSource;
pub use session_store::SessionStore;
