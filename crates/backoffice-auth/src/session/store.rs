//! In-memory session storage.

use std::collections::HashMap;

use backoffice_core::traits::SessionStore;

/// `localStorage`-like key/value store kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    items: HashMap<String, String>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given items.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemorySessionStore::new();
        assert!(store.is_empty());
        store.set_item("accessToken", "abc");
        assert_eq!(store.get_item("accessToken").as_deref(), Some("abc"));
        store.set_item("accessToken", "def");
        assert_eq!(store.get_item("accessToken").as_deref(), Some("def"));
        store.remove_item("accessToken");
        store.remove_item("accessToken");
        assert_eq!(store.get_item("accessToken"), None);
    }

    #[test]
    fn test_with_items() {
        let store = MemorySessionStore::with_items([("user", "{}"), ("accessToken", "t")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_item("user").as_deref(), Some("{}"));
    }
}
