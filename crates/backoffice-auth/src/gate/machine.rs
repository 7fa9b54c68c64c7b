//! The route-authorization state machine.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use backoffice_core::config::{AppConfig, AuthConfig};
use backoffice_core::error::AppError;
use backoffice_core::types::{CapabilityCodes, PermissionPayload, StoredUser};

use super::decision::{AuthDecision, Evaluation, GateEffect, SignOutReason};
use super::redirect_guard::RedirectGuard;
use super::resolver::RedirectResolver;
use crate::permission::{PermissionIndex, PermissionSnapshot};
use crate::routing::{RoleDefaultMap, RouteTable};
use crate::session::SessionGuard;
use crate::token::decode_claims;

/// Client session state read by the gate on each evaluation.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Stored access token.
    pub access_token: Option<String>,
    /// Stored user blob.
    pub user: Option<StoredUser>,
    /// Evaluation time.
    pub now: DateTime<Utc>,
}

impl SessionContext {
    /// Context evaluated at the current time.
    pub fn new(access_token: Option<String>, user: Option<StoredUser>) -> Self {
        Self::at(access_token, user, Utc::now())
    }

    /// Context evaluated at `now`.
    pub fn at(access_token: Option<String>, user: Option<StoredUser>, now: DateTime<Utc>) -> Self {
        Self {
            access_token,
            user,
            now,
        }
    }

    /// Effective role name from the stored user.
    pub fn role_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(StoredUser::role_name)
    }

    /// Role id from the stored user, else from the token claims.
    pub fn role_id(&self) -> Option<String> {
        self.user.as_ref().and_then(StoredUser::role_id).or_else(|| {
            self.access_token
                .as_deref()
                .and_then(|t| decode_claims(t).ok())
                .and_then(|claims| claims.role_id())
        })
    }
}

/// Permission data of the active session.
#[derive(Debug, Clone)]
enum PermissionState {
    /// Not fetched yet, or the fetch is in flight.
    Pending,
    /// Fetched.
    Loaded {
        snapshot: PermissionSnapshot,
        index: PermissionIndex,
    },
    /// The fetch failed; the session must end.
    Failed(String),
}

/// A session is identified by its access token.
#[derive(Debug, Clone)]
struct ActiveSession {
    id: Uuid,
    token: String,
    fetch_requested: bool,
    permissions: PermissionState,
}

impl ActiveSession {
    fn start(token: String) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "Session started");
        Self {
            id,
            token,
            fetch_requested: false,
            permissions: PermissionState::Pending,
        }
    }
}

/// Internal classification carrying what the effects need.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Allow(AuthDecision),
    Wait,
    TokenInvalid,
    NeedsPermissions { token: String, role_id: String },
    FetchImpossible,
    FetchFailed,
    Redirect { to: String },
    Denied,
}

impl Verdict {
    fn decision(&self) -> AuthDecision {
        match self {
            Self::Allow(decision) => *decision,
            Self::Wait | Self::TokenInvalid | Self::NeedsPermissions { .. } => {
                AuthDecision::Checking
            }
            Self::FetchImpossible | Self::FetchFailed | Self::Redirect { .. } => {
                AuthDecision::Redirecting
            }
            Self::Denied => AuthDecision::Unauthorized,
        }
    }
}

/// Decides, per path, whether to render, wait, redirect, or deny.
///
/// Evaluations are pure apart from the guards: a session requests its
/// permissions once, and each path gets at most one navigation until the
/// path changes. An invalid token ends the session.
#[derive(Debug, Clone)]
pub struct AuthGate {
    routes: RouteTable,
    roles: RoleDefaultMap,
    codes: CapabilityCodes,
    login_path: String,
    public_paths: HashSet<String>,
    session_guard: SessionGuard,
    ready: bool,
    current_path: Option<String>,
    session: Option<ActiveSession>,
    redirect_guard: RedirectGuard,
}

impl AuthGate {
    /// Creates a gate over injected tables.
    pub fn new(
        routes: RouteTable,
        roles: RoleDefaultMap,
        codes: CapabilityCodes,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            routes,
            roles,
            codes,
            login_path: auth.login_path.clone(),
            public_paths: auth.public_paths.iter().cloned().collect(),
            session_guard: SessionGuard::new(auth),
            ready: false,
            current_path: None,
            session: None,
            redirect_guard: RedirectGuard::new(),
        }
    }

    /// Creates a gate from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let routes = RouteTable::from_entries(&config.routing.routes)?;
        let roles = RoleDefaultMap::new(&config.routing.role_defaults, &routes);
        Ok(Self::new(
            routes,
            roles,
            config.routing.capabilities.clone(),
            &config.auth,
        ))
    }

    /// Signals that the host can render; until then every path is `Checking`.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Whether [`mark_ready`](Self::mark_ready) was called.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Records the current path. Returns `true` if it changed.
    ///
    /// A change re-arms the navigation guard.
    pub fn set_path(&mut self, path: &str) -> bool {
        if self.current_path.as_deref() == Some(path) {
            return false;
        }
        debug!(from = ?self.current_path, to = path, "Path changed");
        self.current_path = Some(path.to_string());
        self.redirect_guard.reset();
        true
    }

    /// The current path.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// The sign-in route.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The role landing pages.
    pub fn roles(&self) -> &RoleDefaultMap {
        &self.roles
    }

    /// Identifier of the active session, if any.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Snapshot of the active session, if loaded.
    pub fn snapshot(&self) -> Option<&PermissionSnapshot> {
        match &self.session.as_ref()?.permissions {
            PermissionState::Loaded { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Permission index of the active session, if loaded.
    pub fn index(&self) -> Option<&PermissionIndex> {
        match &self.session.as_ref()?.permissions {
            PermissionState::Loaded { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Why the active session's permission fetch failed, if it did.
    pub fn fetch_error(&self) -> Option<&str> {
        match &self.session.as_ref()?.permissions {
            PermissionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Stores the fetched permissions of a session.
    ///
    /// Returns `false` if the session has since ended. Within a session the
    /// last response wins.
    pub fn permissions_loaded(&mut self, session_id: Uuid, payload: PermissionPayload) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.id == session_id) else {
            warn!(%session_id, "Discarding permissions for an ended session");
            return false;
        };
        let snapshot = PermissionSnapshot::from_payload(payload);
        let index = PermissionIndex::new(&snapshot, &self.codes);
        info!(%session_id, pages = snapshot.grants.len(), "Permissions loaded");
        session.permissions = PermissionState::Loaded { snapshot, index };
        true
    }

    /// Records a failed permission fetch. Returns `false` if the session has ended.
    pub fn permissions_failed(&mut self, session_id: Uuid, error: &AppError) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.id == session_id) else {
            warn!(%session_id, "Discarding fetch failure for an ended session");
            return false;
        };
        warn!(%session_id, error = %error, "Permission fetch failed");
        session.permissions = PermissionState::Failed(error.to_string());
        true
    }

    /// Ends the session and drops its permissions.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(session_id = %session.id, "Session ended");
        }
    }

    /// Classifies the current path without side effects.
    pub fn classify(&self, ctx: &SessionContext) -> AuthDecision {
        self.verdict(ctx).decision()
    }

    /// Classifies the current path and lists the effects to perform.
    pub fn evaluate(&mut self, ctx: &SessionContext) -> Evaluation {
        let verdict = self.verdict(ctx);
        let decision = verdict.decision();
        let mut effects = Vec::new();

        match verdict {
            Verdict::TokenInvalid => {
                self.sign_out();
                if self.claim_navigation() {
                    info!(path = ?self.current_path, "Access token invalid; signing out");
                    effects.push(self.sign_out_effect(SignOutReason::TokenInvalid));
                }
            }
            Verdict::NeedsPermissions { token, role_id } => {
                if self.session.as_ref().is_none_or(|s| s.token != token) {
                    self.session = Some(ActiveSession::start(token));
                }
                if let Some(session) = self.session.as_mut() {
                    if !session.fetch_requested {
                        session.fetch_requested = true;
                        info!(session_id = %session.id, %role_id, "Requesting permissions");
                        effects.push(GateEffect::FetchPermissions {
                            session_id: session.id,
                            role_id,
                            access_token: session.token.clone(),
                        });
                    }
                }
            }
            Verdict::FetchImpossible | Verdict::FetchFailed => {
                if self.claim_navigation() {
                    info!(path = ?self.current_path, "Permissions unavailable; signing out");
                    effects.push(self.sign_out_effect(SignOutReason::PermissionFetchFailed));
                }
            }
            Verdict::Redirect { to } => {
                if self.claim_navigation() {
                    info!(from = ?self.current_path, to = %to, "Redirecting from denied route");
                    effects.push(GateEffect::Navigate { to });
                }
            }
            Verdict::Allow(_) | Verdict::Wait | Verdict::Denied => {}
        }

        debug!(path = ?self.current_path, %decision, effects = effects.len(), "Evaluated route");
        Evaluation { decision, effects }
    }

    fn verdict(&self, ctx: &SessionContext) -> Verdict {
        if !self.ready {
            return Verdict::Wait;
        }
        let Some(path) = self.current_path.as_deref() else {
            return Verdict::Wait;
        };
        if path == self.login_path {
            return Verdict::Allow(AuthDecision::AuthorizedAuthRoute);
        }
        if self.public_paths.contains(path) {
            return Verdict::Allow(AuthDecision::AuthorizedPublic);
        }

        let token = match ctx.access_token.as_deref() {
            Some(t) if self.session_guard.is_token_valid_at(Some(t), ctx.now) => t,
            _ => return Verdict::TokenInvalid,
        };

        let state = self
            .session
            .as_ref()
            .filter(|s| s.token == token)
            .map(|s| &s.permissions);

        let index = match state {
            None | Some(PermissionState::Pending) => {
                return match ctx.role_id() {
                    Some(role_id) => Verdict::NeedsPermissions {
                        token: token.to_string(),
                        role_id,
                    },
                    None => Verdict::FetchImpossible,
                };
            }
            Some(PermissionState::Failed(_)) => return Verdict::FetchFailed,
            Some(PermissionState::Loaded { index, .. }) => index,
        };

        let Some(route) = self.routes.route_for_path(path) else {
            return Verdict::Allow(AuthDecision::AuthorizedProtected);
        };
        if index.has_view_permission_for(route) {
            return Verdict::Allow(AuthDecision::AuthorizedProtected);
        }

        match RedirectResolver::new(&self.routes, &self.roles).resolve(index, ctx.role_name()) {
            Some(to) if to != path => Verdict::Redirect { to },
            _ => Verdict::Denied,
        }
    }

    fn claim_navigation(&mut self) -> bool {
        match self.current_path.as_deref() {
            Some(path) => self.redirect_guard.try_acquire(path),
            None => false,
        }
    }

    fn sign_out_effect(&self, reason: SignOutReason) -> GateEffect {
        GateEffect::SignOut {
            reason,
            redirect_to: self.login_path.clone(),
        }
    }
}
