//! Permission source backed by a payload held in memory.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::traits::PermissionSource;
use backoffice_core::types::PermissionPayload;

/// Serves the same payload (or the same error) for every role.
///
/// Used for offline evaluation from a saved backend response.
#[derive(Debug)]
pub struct StaticPermissionSource {
    result: Result<PermissionPayload, AppError>,
    calls: AtomicUsize,
}

impl StaticPermissionSource {
    /// Serves `payload`.
    pub fn new(payload: PermissionPayload) -> Self {
        Self {
            result: Ok(payload),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every fetch with `error`.
    pub fn failing(error: AppError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Loads a saved `{ "permissions": [...] }` body from disk.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    /// Number of fetches served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionSource for StaticPermissionSource {
    async fn fetch_permissions(
        &self,
        _role_id: &str,
        _access_token: &str,
    ) -> AppResult<PermissionPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
