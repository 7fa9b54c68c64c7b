//! Role → landing page lookup.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use super::table::RouteTable;

/// Normalizes a role name for lookup: trimmed and lower-cased.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

/// Immutable map from normalized role name to its landing path.
#[derive(Debug, Clone, Default)]
pub struct RoleDefaultMap {
    defaults: HashMap<String, String>,
}

impl RoleDefaultMap {
    /// Builds the map, normalizing keys.
    ///
    /// Defaults pointing at paths outside `routes` are kept but logged; the
    /// redirect resolver never lands on them.
    pub fn new(defaults: &BTreeMap<String, String>, routes: &RouteTable) -> Self {
        let defaults = defaults
            .iter()
            .map(|(role, path)| {
                if routes.route_for_path(path).is_none() {
                    warn!(role = %role, path = %path, "Role landing page is not a guarded route");
                }
                (normalize_role(role), path.clone())
            })
            .collect();
        Self { defaults }
    }

    /// Landing path for a role, if one is configured.
    pub fn default_route(&self, role: &str) -> Option<&str> {
        self.defaults.get(&normalize_role(role)).map(String::as_str)
    }

    /// Number of configured roles.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether no role has a landing page.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// All `(role, path)` pairs, sorted by role.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .defaults
            .iter()
            .map(|(r, p)| (r.as_str(), p.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}
