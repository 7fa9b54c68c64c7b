//! Layout controller: feeds navigation into the gate and executes its effects.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use backoffice_core::config::{AppConfig, AuthConfig};
use backoffice_core::result::AppResult;
use backoffice_core::traits::{PermissionSource, SessionStore};
use backoffice_core::types::StoredUser;

use crate::gate::{AuthDecision, AuthGate, GateEffect, SessionContext};

/// Upper bound on evaluate/execute rounds per navigation.
const MAX_SETTLE_ROUNDS: usize = 16;

/// Where a navigation ended up and what to render there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOutcome {
    /// Final path after redirects.
    pub path: String,
    /// Decision for the final path.
    pub decision: AuthDecision,
    /// Paths the controller navigated to on its own, in order.
    pub redirects: Vec<String>,
}

/// Drives an [`AuthGate`] the way the application layout does.
///
/// Session state comes from a [`SessionStore`] and permissions from a
/// [`PermissionSource`]; sign-out clears the stored token.
#[derive(Debug)]
pub struct LayoutController<S: SessionStore> {
    gate: AuthGate,
    store: S,
    source: Arc<dyn PermissionSource>,
    token_key: String,
    user_key: String,
    history: Vec<String>,
}

impl<S: SessionStore> LayoutController<S> {
    /// Creates a controller around an existing gate.
    pub fn new(
        gate: AuthGate,
        store: S,
        source: Arc<dyn PermissionSource>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            gate,
            store,
            source,
            token_key: auth.token_storage_key.clone(),
            user_key: auth.user_storage_key.clone(),
            history: Vec::new(),
        }
    }

    /// Creates a controller and its gate from configuration.
    pub fn from_config(
        config: &AppConfig,
        store: S,
        source: Arc<dyn PermissionSource>,
    ) -> AppResult<Self> {
        let gate = AuthGate::from_config(config)?;
        Ok(Self::new(gate, store, source, &config.auth))
    }

    /// Marks the host as ready to render.
    pub fn hydrate(&mut self) {
        self.gate.mark_ready();
    }

    /// The gate.
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// The session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the session store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Visited paths, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Stores a fresh token and user blob, as the login page does.
    pub fn sign_in(&mut self, access_token: &str, user_json: &str) {
        self.store.set_item(&self.token_key, access_token);
        self.store.set_item(&self.user_key, user_json);
    }

    /// Reads the current session from the store.
    ///
    /// An unreadable user blob is treated as absent.
    pub fn session_context(&self) -> SessionContext {
        let user = self
            .store
            .get_item(&self.user_key)
            .and_then(|raw| match StoredUser::from_json(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable stored user");
                    None
                }
            });
        SessionContext::new(self.store.get_item(&self.token_key), user)
    }

    /// Navigates to `path` and settles.
    pub async fn navigate(&mut self, path: &str) -> LayoutOutcome {
        self.enter(path);
        self.settle(Vec::new()).await
    }

    /// Re-evaluates the current path, e.g. after the store changed.
    pub async fn refresh(&mut self) -> LayoutOutcome {
        self.settle(Vec::new()).await
    }

    /// Returns to the previous path, the access-denied view's only action.
    pub async fn go_back(&mut self) -> Option<LayoutOutcome> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.last()?.clone();
        self.gate.set_path(&previous);
        Some(self.settle(Vec::new()).await)
    }

    fn enter(&mut self, path: &str) {
        if self.gate.set_path(path) {
            self.history.push(path.to_string());
        }
    }

    async fn settle(&mut self, mut redirects: Vec<String>) -> LayoutOutcome {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let ctx = self.session_context();
            let evaluation = self.gate.evaluate(&ctx);
            if evaluation.effects.is_empty() {
                return self.outcome(evaluation.decision, redirects);
            }
            for effect in evaluation.effects {
                self.execute(effect, &mut redirects).await;
            }
        }

        warn!(path = ?self.gate.current_path(), "Route gate did not settle");
        let decision = self.gate.classify(&self.session_context());
        self.outcome(decision, redirects)
    }

    async fn execute(&mut self, effect: GateEffect, redirects: &mut Vec<String>) {
        match effect {
            GateEffect::FetchPermissions {
                session_id,
                role_id,
                access_token,
            } => match self.source.fetch_permissions(&role_id, &access_token).await {
                Ok(payload) => {
                    self.gate.permissions_loaded(session_id, payload);
                }
                Err(e) => {
                    self.gate.permissions_failed(session_id, &e);
                }
            },
            GateEffect::Navigate { to } => {
                self.enter(&to);
                redirects.push(to);
            }
            GateEffect::SignOut {
                reason,
                redirect_to,
            } => {
                info!(
                    %reason,
                    fetch_error = ?self.gate.fetch_error(),
                    "Clearing session"
                );
                self.store.remove_item(&self.token_key);
                self.gate.sign_out();
                self.enter(&redirect_to);
                redirects.push(redirect_to);
            }
        }
    }

    fn outcome(&self, decision: AuthDecision, redirects: Vec<String>) -> LayoutOutcome {
        LayoutOutcome {
            path: self.gate.current_path().unwrap_or_default().to_string(),
            decision,
            redirects,
        }
    }
}
