//! Gate outputs: the render decision and the requested side effects.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// What the layout should render for the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthDecision {
    /// Validation in flight; render a loader.
    Checking,
    /// Leaving for another route; render a loader.
    Redirecting,
    /// No reachable route; render the access-denied view.
    Unauthorized,
    /// Public route.
    AuthorizedPublic,
    /// The sign-in route.
    AuthorizedAuthRoute,
    /// Guarded or unguarded route the session may view.
    AuthorizedProtected,
}

impl AuthDecision {
    /// Whether the page content may be rendered.
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            Self::AuthorizedPublic | Self::AuthorizedAuthRoute | Self::AuthorizedProtected
        )
    }

    /// Whether the decision is final for the current path.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Checking | Self::Redirecting)
    }

    /// Return the decision as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Redirecting => "redirecting",
            Self::Unauthorized => "unauthorized",
            Self::AuthorizedPublic => "authorized_public",
            Self::AuthorizedAuthRoute => "authorized_auth_route",
            Self::AuthorizedProtected => "authorized_protected",
        }
    }
}

impl fmt::Display for AuthDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a session is being ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOutReason {
    /// Token missing, malformed, or expired.
    TokenInvalid,
    /// The permission fetch failed or could not be attempted.
    PermissionFetchFailed,
}

impl fmt::Display for SignOutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenInvalid => write!(f, "token_invalid"),
            Self::PermissionFetchFailed => write!(f, "permission_fetch_failed"),
        }
    }
}

/// A side effect the host must execute after an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GateEffect {
    /// Fetch the role's permissions and report back with
    /// [`AuthGate::permissions_loaded`](super::AuthGate::permissions_loaded).
    FetchPermissions {
        /// Session the fetch belongs to.
        session_id: Uuid,
        /// Role whose grants to fetch.
        role_id: String,
        /// Bearer token for the request.
        access_token: String,
    },
    /// Replace the current route.
    Navigate {
        /// Path to go to.
        to: String,
    },
    /// Clear the stored token and go to the sign-in route.
    SignOut {
        /// Why the session ended.
        reason: SignOutReason,
        /// Sign-in route.
        redirect_to: String,
    },
}

/// Result of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// What to render.
    pub decision: AuthDecision,
    /// What to do, in order.
    pub effects: Vec<GateEffect>,
}

impl Evaluation {
    /// Evaluation with no side effects.
    pub fn settled(decision: AuthDecision) -> Self {
        Self {
            decision,
            effects: Vec::new(),
        }
    }
}
