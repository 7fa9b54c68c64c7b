//! Session and route-access configuration.

use serde::{Deserialize, Serialize};

/// Client session and gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The sign-in route. Always reachable; invalid sessions are sent here.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Routes reachable without a session.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Clock-skew allowance applied to the token expiry, in seconds.
    #[serde(default)]
    pub expiry_leeway_seconds: u64,
    /// Storage key holding the access token.
    #[serde(default = "default_token_key")]
    pub token_storage_key: String,
    /// Storage key holding the signed-in user blob.
    #[serde(default = "default_user_key")]
    pub user_storage_key: String,
}

impl AuthConfig {
    /// Whether the path is in the public allow-list.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            public_paths: default_public_paths(),
            expiry_leeway_seconds: 0,
            token_storage_key: default_token_key(),
            user_storage_key: default_user_key(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/support".to_string(),
        "/privacy-policy".to_string(),
        "/terms".to_string(),
    ]
}

fn default_token_key() -> String {
    "accessToken".to_string()
}

fn default_user_key() -> String {
    "user".to_string()
}
