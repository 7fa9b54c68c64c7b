//! Access-token freshness check.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use backoffice_core::config::AuthConfig;
use backoffice_core::result::AppResult;

use crate::token::{TokenClaims, decode_claims};

/// Decides whether a stored access token can still be used.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    /// Clock-skew allowance added to the token expiry.
    leeway: Duration,
}

impl SessionGuard {
    /// Creates a guard with the configured leeway.
    ///
    /// Leeways beyond what `Duration` can hold are clamped to its maximum;
    /// `AppConfig::validate` rejects them before this point.
    pub fn new(config: &AuthConfig) -> Self {
        let leeway = i64::try_from(config.expiry_leeway_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::with_leeway(leeway)
    }

    /// Creates a guard with an explicit leeway.
    pub fn with_leeway(leeway: Duration) -> Self {
        Self { leeway }
    }

    /// Checks the token against the current time.
    pub fn is_token_valid(&self, token: Option<&str>) -> bool {
        self.is_token_valid_at(token, Utc::now())
    }

    /// Checks the token against `now`.
    ///
    /// Absent, malformed, `exp`-less, and expired tokens are all invalid.
    /// Decoding failures are never surfaced as errors.
    pub fn is_token_valid_at(&self, token: Option<&str>, now: DateTime<Utc>) -> bool {
        let Some(token) = token else {
            return false;
        };
        match decode_claims(token) {
            Ok(claims) => !claims.is_expired_at(now, self.leeway),
            Err(e) => {
                debug!(error = %e, "Rejecting undecodable access token");
                false
            }
        }
    }

    /// Decodes the token for display, surfacing why it cannot be read.
    pub fn inspect(&self, token: &str) -> AppResult<TokenClaims> {
        Ok(decode_claims(token)?)
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::with_leeway(Duration::zero())
    }
}
