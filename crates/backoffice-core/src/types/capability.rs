//! Named page capabilities and their backend integer codes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A page-level capability the backend can grant to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// The page may be opened at all.
    View,
    /// Records on the page may be created.
    Create,
    /// Records on the page may be edited.
    Edit,
    /// Records on the page may be deleted.
    Delete,
    /// Files may be uploaded from the page.
    Upload,
}

impl Capability {
    /// All capabilities, in display order.
    pub const ALL: [Capability; 5] = [
        Self::View,
        Self::Create,
        Self::Edit,
        Self::Delete,
        Self::Upload,
    ];

    /// Return the capability as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "upload" => Ok(Self::Upload),
            _ => Err(AppError::validation(format!(
                "Invalid capability: '{s}'. Expected one of: view, create, edit, delete, upload"
            ))),
        }
    }
}

/// Capability-name → backend permission id table.
///
/// Deserialized from the `[routing.capabilities]` configuration section,
/// e.g. `view = 17`. Capabilities without a code are never granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityCodes {
    codes: HashMap<Capability, i64>,
}

impl CapabilityCodes {
    /// Build a table from explicit pairs.
    ///
    /// Two capabilities sharing one code is a configuration error.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Capability, i64)>) -> Result<Self, AppError> {
        let mut codes = HashMap::new();
        for (capability, code) in pairs {
            if let Some(existing) = codes
                .iter()
                .find(|&(other, c)| *c == code && *other != capability)
                .map(|(other, _)| *other)
            {
                return Err(AppError::configuration(format!(
                    "Capability code {code} is assigned to both '{existing}' and '{capability}'"
                )));
            }
            codes.insert(capability, code);
        }
        Ok(Self { codes })
    }

    /// Re-check a deserialized table for shared codes.
    pub fn validate(&self) -> Result<(), AppError> {
        Self::from_pairs(self.codes.iter().map(|(c, code)| (*c, *code))).map(|_| ())
    }

    /// Backend code for a capability, if mapped.
    pub fn code(&self, capability: Capability) -> Option<i64> {
        self.codes.get(&capability).copied()
    }

    /// Capability for a backend code, if any.
    pub fn capability(&self, code: i64) -> Option<Capability> {
        self.codes
            .iter()
            .find(|&(_, c)| *c == code)
            .map(|(capability, _)| *capability)
    }

    /// The code that gates page visibility.
    pub fn view_code(&self) -> Option<i64> {
        self.code(Capability::View)
    }
}

impl Default for CapabilityCodes {
    /// The backend's observed conventions: view = 17, delete = 4, edit = 22.
    fn default() -> Self {
        let codes = [
            (Capability::View, 17),
            (Capability::Delete, 4),
            (Capability::Edit, 22),
        ]
        .into_iter()
        .collect();
        Self { codes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codes() {
        let codes = CapabilityCodes::default();
        assert_eq!(codes.view_code(), Some(17));
        assert_eq!(codes.code(Capability::Delete), Some(4));
        assert_eq!(codes.code(Capability::Edit), Some(22));
        assert_eq!(codes.code(Capability::Upload), None);
        assert_eq!(codes.capability(22), Some(Capability::Edit));
        assert_eq!(codes.capability(99), None);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = CapabilityCodes::from_pairs([(Capability::View, 17), (Capability::Edit, 17)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("VIEW".parse::<Capability>().unwrap(), Capability::View);
        assert_eq!(" upload ".parse::<Capability>().unwrap(), Capability::Upload);
        assert!("approve".parse::<Capability>().is_err());
    }

    #[test]
    fn test_deserialize_from_json_table() {
        let codes: CapabilityCodes =
            serde_json::from_str(r#"{"view": 1, "upload": 30}"#).unwrap();
        assert_eq!(codes.view_code(), Some(1));
        assert_eq!(codes.code(Capability::Upload), Some(30));
        assert_eq!(codes.code(Capability::Delete), None);
    }
}
