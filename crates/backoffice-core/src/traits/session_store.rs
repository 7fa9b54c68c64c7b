//! Client-side key/value storage for the session.

/// Synchronous string storage with `localStorage` semantics.
pub trait SessionStore: Send + std::fmt::Debug {
    /// Read a value.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str);

    /// Remove a value. Removing a missing key is a no-op.
    fn remove_item(&mut self, key: &str);
}
