//! # backoffice-auth
//!
//! Client-side route authorization for the back office.
//!
//! ## Modules
//!
//! - `token` - access-token payload decoding and claims
//! - `session` - token freshness checks and the in-memory session store
//! - `permission` - permission snapshots and the page → capability index
//! - `routing` - the guarded route table and role landing pages
//! - `gate` - the route-authorization state machine and redirect resolution
//! - `client` - permission sources (REST backend, fixed payloads)
//! - `layout` - the host-side driver that executes gate effects

pub mod client;
pub mod gate;
pub mod layout;
pub mod permission;
pub mod routing;
pub mod session;
pub mod token;

pub use client::{HttpPermissionSource, StaticPermissionSource};
pub use gate::{AuthDecision, AuthGate, Evaluation, GateEffect, RedirectResolver, SignOutReason};
pub use layout::{LayoutController, LayoutOutcome};
pub use permission::{PermissionIndex, PermissionSnapshot};
pub use routing::{RoleDefaultMap, RouteDescriptor, RouteTable};
pub use session::{MemorySessionStore, SessionGuard};
pub use token::{TokenClaims, TokenError};
