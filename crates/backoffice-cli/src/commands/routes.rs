//! Route table listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use backoffice_auth::{PermissionIndex, RouteTable};
use backoffice_core::config::AppConfig;
use backoffice_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the routes command
#[derive(Debug, Args)]
pub struct RoutesArgs {
    /// Saved permissions response to evaluate each route against
    #[arg(short, long)]
    pub permissions: Option<String>,
}

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Fallback order
    #[tabled(rename = "#")]
    priority: usize,
    /// Client path
    path: String,
    /// Backend page name
    page: String,
    /// Backend page id
    page_id: String,
    /// Viewable with the given permissions
    view: String,
    /// Granted capabilities
    capabilities: String,
}

/// Execute the routes command
pub fn execute(args: &RoutesArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let routes = RouteTable::from_entries(&config.routing.routes)?;
    let index = args
        .permissions
        .as_ref()
        .map(|path| super::load_index(path, &config.routing.capabilities))
        .transpose()?;

    let rows = route_rows(&routes, index.as_ref());
    output::print_list(&rows, format);
    Ok(())
}

fn route_rows(routes: &RouteTable, index: Option<&PermissionIndex>) -> Vec<RouteRow> {
    routes
        .iter()
        .map(|route| {
            let (view, capabilities) = match index {
                Some(index) => (
                    output::mark(index.has_view_permission_for(route)),
                    index
                        .capabilities(&route.page_name)
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            RouteRow {
                priority: route.priority,
                path: route.path.clone(),
                page: route.page_name.clone(),
                page_id: route.page_id.map(|id| id.to_string()).unwrap_or_default(),
                view,
                capabilities,
            }
        })
        .collect()
}
