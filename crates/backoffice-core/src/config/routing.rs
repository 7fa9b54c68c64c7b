//! Routing tables: guarded routes and role landing pages.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::CapabilityCodes;

/// One permission-checked route.
///
/// Table order is fallback preference: the first entry is tried first when
/// a user has to be sent somewhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Exact client path, case-sensitive.
    pub path: String,
    /// Page name the backend uses in permission grants, case-sensitive.
    pub page_name: String,
    /// Numeric page id, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<i64>,
}

impl RouteEntry {
    /// Convenience constructor for a route without a page id.
    pub fn new(path: impl Into<String>, page_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page_name: page_name.into(),
            page_id: None,
        }
    }
}

/// Route-authorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Guarded routes in fallback order.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteEntry>,
    /// Role name → landing path. Keys are matched case-insensitively.
    #[serde(default = "default_role_defaults")]
    pub role_defaults: BTreeMap<String, String>,
    /// Capability → backend permission id.
    #[serde(default)]
    pub capabilities: CapabilityCodes,
}

impl RoutingConfig {
    /// Reject tables the gate cannot evaluate deterministically.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.path.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "Route path '{}' must start with '/'",
                    route.path
                )));
            }
            if route.page_name.trim().is_empty() {
                return Err(AppError::configuration(format!(
                    "Route '{}' has an empty page name",
                    route.path
                )));
            }
            if !seen.insert(route.path.as_str()) {
                return Err(AppError::configuration(format!(
                    "Route path '{}' is listed more than once",
                    route.path
                )));
            }
        }
        if self.capabilities.view_code().is_none() {
            return Err(AppError::configuration(
                "No backend code configured for the 'view' capability",
            ));
        }
        self.capabilities.validate()
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes: default_routes(),
            role_defaults: default_role_defaults(),
            capabilities: CapabilityCodes::default(),
        }
    }
}

fn default_routes() -> Vec<RouteEntry> {
    [
        ("/", "Dashboard"),
        ("/leads", "Leads"),
        ("/bookings", "Bookings"),
        ("/collection", "Collection"),
        ("/creditcollection", "CreditCollection"),
        ("/onlinecollection", "OnlineCollection"),
        ("/Assistantdirector", "Assistantdirector"),
        ("/projects", "Projects"),
        ("/reports", "Reports"),
        ("/notifications", "Notifications"),
        ("/users", "Users"),
        ("/roles", "Roles"),
        ("/settings", "Settings"),
    ]
    .into_iter()
    .map(|(path, page)| RouteEntry::new(path, page))
    .collect()
}

fn default_role_defaults() -> BTreeMap<String, String> {
    [
        ("admin", "/"),
        ("super admin", "/"),
        ("assistant director", "/Assistantdirector"),
        ("sales manager", "/bookings"),
        ("sales executive", "/leads"),
        ("accounts", "/collection"),
        ("crm executive", "/collection"),
    ]
    .into_iter()
    .map(|(role, path)| (role.to_string(), path.to_string()))
    .collect()
}
