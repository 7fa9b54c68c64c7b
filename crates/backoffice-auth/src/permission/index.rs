//! Page → capability lookup built from a permission snapshot.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use backoffice_core::types::{Capability, CapabilityCodes};

use super::snapshot::PermissionSnapshot;
use crate::routing::RouteDescriptor;

/// Read-only index over one [`PermissionSnapshot`].
///
/// Lookups are exact and case-sensitive. A page missing from the snapshot
/// has no capabilities (default deny).
#[derive(Debug, Clone)]
pub struct PermissionIndex {
    /// Page name → granted codes.
    by_name: HashMap<String, BTreeSet<i64>>,
    /// Page id → page name, for grants that carry an id.
    by_id: HashMap<i64, String>,
    /// Capability code table.
    codes: CapabilityCodes,
}

impl PermissionIndex {
    /// Builds the index for a snapshot.
    pub fn new(snapshot: &PermissionSnapshot, codes: &CapabilityCodes) -> Self {
        let mut by_name = HashMap::with_capacity(snapshot.grants.len());
        let mut by_id = HashMap::new();
        for grant in &snapshot.grants {
            by_name.insert(grant.page_name.clone(), grant.permission_ids.clone());
            if let Some(id) = grant.page_id {
                by_id.insert(id, grant.page_name.clone());
            }
        }
        Self {
            by_name,
            by_id,
            codes: codes.clone(),
        }
    }

    /// Whether the page may be viewed.
    ///
    /// True iff the page has a non-empty grant containing the view code.
    pub fn has_view_permission(&self, page_name: &str) -> bool {
        self.has_capability(page_name, Capability::View)
    }

    /// Whether the page grants `capability`. Unmapped capabilities are never granted.
    pub fn has_capability(&self, page_name: &str, capability: Capability) -> bool {
        let Some(code) = self.codes.code(capability) else {
            return false;
        };
        self.by_name
            .get(page_name)
            .is_some_and(|ids| !ids.is_empty() && ids.contains(&code))
    }

    /// Named capabilities granted on a page, in display order.
    pub fn capabilities(&self, page_name: &str) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has_capability(page_name, *c))
            .collect()
    }

    /// View check for a route, consulting both its page name and page id.
    ///
    /// The page name decides. When the route carries a page id and the id
    /// lookup disagrees, the divergence is logged.
    pub fn has_view_permission_for(&self, route: &RouteDescriptor) -> bool {
        let by_name = self.has_view_permission(&route.page_name);
        if let Some(page_id) = route.page_id {
            let by_id = self
                .by_id
                .get(&page_id)
                .is_some_and(|name| self.has_view_permission(name));
            if by_id != by_name {
                warn!(
                    path = %route.path,
                    page_name = %route.page_name,
                    page_id,
                    by_name,
                    by_id,
                    "Page name and page id permission lookups disagree"
                );
            }
        }
        by_name
    }

    /// Page names present in the snapshot, sorted.
    pub fn page_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
