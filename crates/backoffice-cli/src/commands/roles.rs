//! Role landing page listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use backoffice_auth::{PermissionIndex, RedirectResolver, RoleDefaultMap, RouteTable};
use backoffice_core::config::AppConfig;
use backoffice_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the roles command
#[derive(Debug, Args)]
pub struct RolesArgs {
    /// Saved permissions response; shows where each role would be redirected
    #[arg(short, long)]
    pub permissions: Option<String>,
}

/// Role display row
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Normalized role name
    role: String,
    /// Configured landing page
    landing: String,
    /// Page name of the landing page
    page: String,
    /// Redirect target with the given permissions
    redirect: String,
}

/// Execute the roles command
pub fn execute(args: &RolesArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let routes = RouteTable::from_entries(&config.routing.routes)?;
    let roles = RoleDefaultMap::new(&config.routing.role_defaults, &routes);
    let index = args
        .permissions
        .as_ref()
        .map(|path| super::load_index(path, &config.routing.capabilities))
        .transpose()?;

    let rows = role_rows(&routes, &roles, index.as_ref());
    output::print_list(&rows, format);
    Ok(())
}

fn role_rows(
    routes: &RouteTable,
    roles: &RoleDefaultMap,
    index: Option<&PermissionIndex>,
) -> Vec<RoleRow> {
    let resolver = RedirectResolver::new(routes, roles);
    roles
        .entries()
        .into_iter()
        .map(|(role, landing)| RoleRow {
            role: role.to_string(),
            landing: landing.to_string(),
            page: routes
                .page_name_for_path(landing)
                .unwrap_or_default()
                .to_string(),
            redirect: match index {
                Some(index) => resolver
                    .resolve(index, Some(role))
                    .unwrap_or_else(|| "access denied".to_string()),
                None => "-".to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use backoffice_auth::PermissionSnapshot;
    use backoffice_core::types::{PermissionGrant, PermissionPayload};

    use super::*;

    #[test]
    fn test_redirect_column_uses_landing_then_fallback() {
        let config = AppConfig::default();
        let routes = RouteTable::from_entries(&config.routing.routes).unwrap();
        let roles = RoleDefaultMap::new(&config.routing.role_defaults, &routes);
        let snapshot = PermissionSnapshot::from_payload(PermissionPayload {
            permissions: vec![
                PermissionGrant::new("Leads", [17]),
                PermissionGrant::new("Bookings", [17]),
            ],
        });
        let index = PermissionIndex::new(&snapshot, &config.routing.capabilities);

        let rows = role_rows(&routes, &roles, Some(&index));
        let find = |role: &str| rows.iter().find(|r| r.role == role).unwrap();
        assert_eq!(find("sales manager").redirect, "/bookings");
        assert_eq!(find("sales executive").redirect, "/leads");
        assert_eq!(find("admin").redirect, "/leads");
        assert_eq!(find("accounts").page, "Collection");
    }
}
