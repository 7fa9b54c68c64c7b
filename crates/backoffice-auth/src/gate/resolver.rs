//! Fallback route selection for denied paths.

use tracing::{debug, warn};

use crate::permission::PermissionIndex;
use crate::routing::{RoleDefaultMap, RouteTable};

/// Picks where to send a user who may not view the current route.
///
/// The role's landing page wins when it is viewable; otherwise the first
/// viewable route in table order. Ties are purely positional.
#[derive(Debug, Clone, Copy)]
pub struct RedirectResolver<'a> {
    routes: &'a RouteTable,
    roles: &'a RoleDefaultMap,
}

impl<'a> RedirectResolver<'a> {
    /// Creates a resolver over the given tables.
    pub fn new(routes: &'a RouteTable, roles: &'a RoleDefaultMap) -> Self {
        Self { routes, roles }
    }

    /// Returns the target path, or `None` if nothing is viewable.
    pub fn resolve(&self, index: &PermissionIndex, role: Option<&str>) -> Option<String> {
        if let Some(path) = role.and_then(|r| self.roles.default_route(r)) {
            match self.routes.route_for_path(path) {
                Some(route) if index.has_view_permission_for(route) => {
                    debug!(path, "Redirecting to role landing page");
                    return Some(route.path.clone());
                }
                Some(_) => debug!(path, "Role landing page is not viewable"),
                None => warn!(path, "Skipping role landing page outside the route table"),
            }
        }

        let target = self
            .routes
            .iter()
            .find(|route| index.has_view_permission_for(route))
            .map(|route| route.path.clone());
        debug!(target = ?target, "Resolved fallback route");
        target
    }
}
