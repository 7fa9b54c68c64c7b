//! Ordered table of permission-checked routes.

use std::collections::HashMap;

use serde::Serialize;

use backoffice_core::config::RouteEntry;
use backoffice_core::error::AppError;

/// A guarded route. `priority` is its position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Exact client path.
    pub path: String,
    /// Page name required to view it.
    pub page_name: String,
    /// Fallback preference, ascending.
    pub priority: usize,
    /// Optional numeric page id.
    pub page_id: Option<i64>,
}

/// Immutable route table.
///
/// Paths not in the table are unguarded and always allowed.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    /// Builds the table from configured entries, in order.
    pub fn from_entries(entries: &[RouteEntry]) -> Result<Self, AppError> {
        let mut routes = Vec::with_capacity(entries.len());
        let mut by_path = HashMap::with_capacity(entries.len());
        for (priority, entry) in entries.iter().enumerate() {
            if by_path.insert(entry.path.clone(), priority).is_some() {
                return Err(AppError::configuration(format!(
                    "Route path '{}' is listed more than once",
                    entry.path
                )));
            }
            routes.push(RouteDescriptor {
                path: entry.path.clone(),
                page_name: entry.page_name.clone(),
                priority,
                page_id: entry.page_id,
            });
        }
        Ok(Self { routes, by_path })
    }

    /// Page name guarding `path`, or `None` for unguarded paths.
    pub fn page_name_for_path(&self, path: &str) -> Option<&str> {
        self.route_for_path(path).map(|r| r.page_name.as_str())
    }

    /// Route descriptor for `path`.
    pub fn route_for_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.by_path.get(path).map(|&i| &self.routes[i])
    }

    /// Routes in ascending priority.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Number of guarded routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use backoffice_core::config::RoutingConfig;

    use super::*;

    #[test]
    fn test_lookup_and_order() {
        let table = RouteTable::from_entries(&RoutingConfig::default().routes).unwrap();
        assert_eq!(table.page_name_for_path("/roles"), Some("Roles"));
        assert_eq!(table.page_name_for_path("/Assistantdirector"), Some("Assistantdirector"));
        assert_eq!(table.page_name_for_path("/assistantdirector"), None);
        assert_eq!(table.page_name_for_path("/profile"), None);

        let priorities: Vec<usize> = table.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
        assert_eq!(table.iter().next().map(|r| r.path.as_str()), Some("/"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let entries = vec![RouteEntry::new("/a", "A"), RouteEntry::new("/a", "B")];
        assert!(RouteTable::from_entries(&entries).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::from_entries(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.page_name_for_path("/"), None);
    }
}
