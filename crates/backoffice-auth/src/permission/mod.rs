//! Permission snapshots fetched from the backend and their lookup index.

pub mod index;
pub mod snapshot;

pub use index::PermissionIndex;
pub use snapshot::PermissionSnapshot;
