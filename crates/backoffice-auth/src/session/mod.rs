//! Session freshness checks and client-side session storage.

pub mod guard;
pub mod store;

pub use guard::SessionGuard;
pub use store::MemorySessionStore;
