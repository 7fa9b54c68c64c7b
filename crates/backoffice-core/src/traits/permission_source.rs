//! Source of role permission payloads.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::PermissionPayload;

/// Fetches the permissions granted to a role.
///
/// Any error is treated by the gate as a failed session, never retried.
#[async_trait]
pub trait PermissionSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the permission payload for `role_id`, authenticated with `access_token`.
    async fn fetch_permissions(
        &self,
        role_id: &str,
        access_token: &str,
    ) -> AppResult<PermissionPayload>;
}
