//! Shared test helpers for integration tests.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backoffice_auth::{HttpPermissionSource, LayoutController, MemorySessionStore};
use backoffice_core::config::AppConfig;
use backoffice_core::traits::SessionStore;

/// Mocked backend plus a configuration pointing at it.
pub struct TestApp {
    /// The mocked REST backend
    pub server: MockServer,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Start a mocked backend with the default routing tables.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let mut config = AppConfig::default();
        config.backend.base_url = format!("{}/api", server.uri());
        config.backend.timeout_seconds = 5;
        Self { server, config }
    }

    /// Expect exactly `times` permission requests for `role_id` carrying `token`.
    pub async fn expect_permissions(&self, role_id: &str, token: &str, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/rolePermissions/roles/{role_id}/permissions")))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer permission requests for `role_id` with a bare status.
    pub async fn fail_permissions(&self, role_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/api/rolePermissions/roles/{role_id}/permissions")))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// A hydrated layout whose store holds `token` and `user`.
    pub fn layout(&self, token: Option<&str>, user: Option<Value>) -> LayoutController<MemorySessionStore> {
        let mut store = MemorySessionStore::new();
        if let Some(token) = token {
            store.set_item("accessToken", token);
        }
        if let Some(user) = user {
            store.set_item("user", &user.to_string());
        }
        let source = Arc::new(HttpPermissionSource::new(&self.config.backend).unwrap());
        let mut layout = LayoutController::from_config(&self.config, store, source).unwrap();
        layout.hydrate();
        layout
    }
}

/// An unsigned token expiring `ttl` from now.
pub fn token_expiring_in(ttl: Duration) -> String {
    let payload = URL_SAFE_NO_PAD.encode(json!({ "exp": (Utc::now() + ttl).timestamp() }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature")
}

/// A token valid for an hour.
pub fn live_token() -> String {
    token_expiring_in(Duration::hours(1))
}

/// Stored-user blob for a role.
pub fn user(role: &str, role_id: i64) -> Value {
    json!({ "id": 99, "name": "Test User", "role": role, "roleId": role_id })
}

/// Permissions body granting view on each page.
pub fn viewable(pages: &[&str]) -> Value {
    let permissions: Vec<Value> = pages
        .iter()
        .map(|page| json!({ "pageName": page, "permissionIds": [17] }))
        .collect();
    json!({ "permissions": permissions })
}
