//! Immutable permission snapshot for one session.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use backoffice_core::types::{PermissionGrant, PermissionPayload};

/// The grants of one role as of `fetched_at`.
///
/// Snapshots are replaced wholesale on every fetch, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// One grant per page; page names are unique.
    pub grants: Vec<PermissionGrant>,
    /// When the payload was received.
    pub fetched_at: DateTime<Utc>,
}

impl PermissionSnapshot {
    /// Builds a snapshot from a backend payload received now.
    pub fn from_payload(payload: PermissionPayload) -> Self {
        Self::from_payload_at(payload, Utc::now())
    }

    /// Builds a snapshot from a backend payload received at `fetched_at`.
    ///
    /// If the backend repeats a page name, the first grant wins.
    pub fn from_payload_at(payload: PermissionPayload, fetched_at: DateTime<Utc>) -> Self {
        let mut seen = HashSet::new();
        let grants = payload
            .permissions
            .into_iter()
            .filter(|grant| {
                let first = seen.insert(grant.page_name.clone());
                if !first {
                    warn!(page = %grant.page_name, "Ignoring duplicate permission grant");
                }
                first
            })
            .collect();
        Self { grants, fetched_at }
    }

    /// Looks up a grant by exact page name.
    pub fn grant(&self, page_name: &str) -> Option<&PermissionGrant> {
        self.grants.iter().find(|g| g.page_name == page_name)
    }

    /// Whether no page is granted at all.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
