//! Permission backend configuration.

use serde::{Deserialize, Serialize};

/// REST backend that serves role permission payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path template for the permissions endpoint. `{role_id}` is substituted.
    #[serde(default = "default_permissions_path")]
    pub permissions_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl BackendConfig {
    /// Full URL of the permissions endpoint for a role.
    pub fn permissions_url(&self, role_id: &str) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.permissions_path.replace("{role_id}", role_id)
        )
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            permissions_path: default_permissions_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_permissions_path() -> String {
    "/rolePermissions/roles/{role_id}/permissions".to_string()
}

fn default_timeout() -> u64 {
    15
}
