//! Wire types of the role-permissions endpoint.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Capabilities granted to a role on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    /// Backend page name, matched case-sensitively against the route table.
    pub page_name: String,
    /// Granted capability codes.
    #[serde(default)]
    pub permission_ids: BTreeSet<i64>,
    /// Numeric page id, sent by newer backend builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<i64>,
}

impl PermissionGrant {
    /// Grant on a page without a page id.
    pub fn new(page_name: impl Into<String>, permission_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            page_name: page_name.into(),
            permission_ids: permission_ids.into_iter().collect(),
            page_id: None,
        }
    }
}

/// Body of `GET /rolePermissions/roles/{roleId}/permissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPayload {
    /// One grant per page the role has any access to.
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}
