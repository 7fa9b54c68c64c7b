//! The signed-in user blob persisted next to the access token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// The client-side `user` record written at login.
///
/// The backend has shipped the role under three different keys over time;
/// they are consulted in the order `role`, `roleName`, `role_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// Role under the `role` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Role under the `roleName` key.
    #[serde(default, rename = "roleName", skip_serializing_if = "Option::is_none")]
    pub role_name_camel: Option<String>,
    /// Role under the `role_name` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// Role identifier under `roleId`.
    #[serde(default, rename = "roleId", skip_serializing_if = "Option::is_none")]
    pub role_id_camel: Option<Value>,
    /// Role identifier under `role_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Value>,
}

impl StoredUser {
    /// Parse the stored JSON blob.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The effective role name, skipping blank values.
    pub fn role_name(&self) -> Option<&str> {
        [&self.role, &self.role_name_camel, &self.role_name]
            .into_iter()
            .flatten()
            .map(|r| r.as_str())
            .find(|r| !r.trim().is_empty())
    }

    /// The role identifier used in the permissions endpoint, as a string.
    ///
    /// Numeric and string ids are both accepted.
    pub fn role_id(&self) -> Option<String> {
        [&self.role_id_camel, &self.role_id]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::Number(n) => Some(n.to_string()),
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_precedence() {
        let user = StoredUser::from_json(
            r#"{"role": "Admin", "roleName": "Sales", "role_name": "Accounts"}"#,
        )
        .unwrap();
        assert_eq!(user.role_name(), Some("Admin"));

        let user = StoredUser::from_json(r#"{"roleName": "Sales", "role_name": "Accounts"}"#)
            .unwrap();
        assert_eq!(user.role_name(), Some("Sales"));

        let user = StoredUser::from_json(r#"{"role": "  ", "role_name": "Accounts"}"#).unwrap();
        assert_eq!(user.role_name(), Some("Accounts"));
    }

    #[test]
    fn test_role_id_forms() {
        let user = StoredUser::from_json(r#"{"roleId": 7}"#).unwrap();
        assert_eq!(user.role_id().as_deref(), Some("7"));

        let user = StoredUser::from_json(r#"{"role_id": " 12 "}"#).unwrap();
        assert_eq!(user.role_id().as_deref(), Some("12"));

        let user = StoredUser::from_json(r#"{"roleId": null, "role_id": 3}"#).unwrap();
        assert_eq!(user.role_id().as_deref(), Some("3"));
    }

    #[test]
    fn test_missing_fields() {
        let user = StoredUser::from_json("{}").unwrap();
        assert_eq!(user.role_name(), None);
        assert_eq!(user.role_id(), None);
        assert!(StoredUser::from_json("not json").is_err());
    }
}
