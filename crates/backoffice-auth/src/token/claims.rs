//! Claims read from an access-token payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subset of the token payload the client cares about.
///
/// Unknown claims are kept in `extra` so the CLI can show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Subject, usually the user id. Numeric or string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,
    /// Role id, when the backend embeds it.
    #[serde(default, rename = "roleId", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Value>,
    /// Every other claim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl TokenClaims {
    /// Expiry in milliseconds since epoch, saturating at the `i64` range.
    pub fn expires_at_millis(&self) -> Option<i64> {
        self.exp.map(|exp| exp.saturating_mul(1000))
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token is expired at `now`.
    ///
    /// A token is still valid at exactly `exp`. A token without `exp` counts
    /// as expired. `leeway` extends the lifetime to tolerate clock skew.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.expires_at_millis() {
            Some(exp_ms) => {
                let deadline = exp_ms.saturating_add(leeway.num_milliseconds());
                now.timestamp_millis() > deadline
            }
            None => true,
        }
    }

    /// Remaining lifetime in seconds at `now` (0 if expired or unknown).
    pub fn remaining_ttl_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.exp
            .and_then(|exp| exp.checked_sub(now.timestamp()))
            .and_then(|remaining| u64::try_from(remaining).ok())
            .unwrap_or(0)
    }

    /// Role id claim as a string, if present.
    pub fn role_id(&self) -> Option<String> {
        match self.role_id.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_exp(exp: Option<i64>) -> TokenClaims {
        TokenClaims {
            exp,
            iat: None,
            sub: None,
            role_id: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(!claims_with_exp(Some(1_700_000_000)).is_expired_at(now, Duration::zero()));
        assert!(!claims_with_exp(Some(1_700_000_001)).is_expired_at(now, Duration::zero()));
        assert!(claims_with_exp(Some(1_699_999_999)).is_expired_at(now, Duration::zero()));

        let just_after = DateTime::from_timestamp_millis(1_700_000_000_001).unwrap();
        assert!(claims_with_exp(Some(1_700_000_000)).is_expired_at(just_after, Duration::zero()));
    }

    #[test]
    fn test_leeway_extends_lifetime() {
        let now = DateTime::from_timestamp(1_700_000_003, 0).unwrap();
        let claims = claims_with_exp(Some(1_700_000_000));
        assert!(claims.is_expired_at(now, Duration::zero()));
        assert!(!claims.is_expired_at(now, Duration::seconds(5)));
    }

    #[test]
    fn test_missing_exp_is_expired() {
        let now = Utc::now();
        let claims = claims_with_exp(None);
        assert!(claims.is_expired_at(now, Duration::seconds(60)));
        assert_eq!(claims.remaining_ttl_seconds(now), 0);
        assert_eq!(claims.expires_at(), None);
    }

    #[test]
    fn test_remaining_ttl() {
        let now = DateTime::from_timestamp(1_000, 0).unwrap();
        assert_eq!(claims_with_exp(Some(1_090)).remaining_ttl_seconds(now), 90);
        assert_eq!(claims_with_exp(Some(900)).remaining_ttl_seconds(now), 0);
    }

    #[test]
    fn test_extreme_exp_values() {
        let now = Utc::now();
        let ancient = claims_with_exp(Some(i64::MIN));
        assert_eq!(ancient.remaining_ttl_seconds(now), 0);
        assert!(ancient.is_expired_at(now, Duration::zero()));
        assert_eq!(ancient.expires_at(), None);

        let forever = claims_with_exp(Some(i64::MAX));
        assert_eq!(
            forever.remaining_ttl_seconds(now),
            (i64::MAX - now.timestamp()) as u64
        );
        assert_eq!(forever.expires_at_millis(), Some(i64::MAX));
        assert!(!forever.is_expired_at(now, Duration::days(1)));
    }
}
