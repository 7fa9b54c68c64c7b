//! Offline gate evaluation against a saved permissions response.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use backoffice_auth::{LayoutController, MemorySessionStore, StaticPermissionSource};
use backoffice_core::config::AppConfig;
use backoffice_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Saved `{"permissions": [...]}` response for the role
    #[arg(short, long)]
    pub permissions: String,

    /// Access token to evaluate with; an unsigned one-hour token is made up when omitted
    #[arg(short, long)]
    pub token: Option<String>,

    /// Role name of the signed-in user
    #[arg(short, long, conflicts_with = "user")]
    pub role: Option<String>,

    /// Role id of the signed-in user
    #[arg(long, default_value = "1", conflicts_with = "user")]
    pub role_id: String,

    /// Raw stored-user JSON, instead of --role/--role-id
    #[arg(short, long)]
    pub user: Option<String>,

    /// Paths to visit, in order
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// One visited path
#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    /// Requested path
    requested: String,
    /// Where navigation settled
    path: String,
    /// Gate decision
    decision: String,
    /// Redirects taken
    redirects: String,
}

/// Execute the check command
pub async fn execute(
    args: &CheckArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let source = Arc::new(StaticPermissionSource::from_file(&args.permissions)?);
    let mut layout = LayoutController::from_config(config, MemorySessionStore::new(), source.clone())?;

    let token = args
        .token
        .clone()
        .unwrap_or_else(|| unsigned_token(&args.role_id, Duration::hours(1)));
    let user = match &args.user {
        Some(raw) => raw.clone(),
        None => serde_json::json!({
            "role": args.role.as_deref().unwrap_or_default(),
            "roleId": args.role_id,
        })
        .to_string(),
    };
    layout.sign_in(&token, &user);
    layout.hydrate();

    let mut rows = Vec::with_capacity(args.paths.len());
    for requested in &args.paths {
        let outcome = layout.navigate(requested).await;
        rows.push(CheckRow {
            requested: requested.clone(),
            path: outcome.path,
            decision: outcome.decision.to_string(),
            redirects: outcome.redirects.join(" → "),
        });
    }

    output::print_list(&rows, format);
    if format == OutputFormat::Table {
        output::print_kv("Permission fetches", &source.calls().to_string());
    }
    Ok(())
}

/// Builds a JWT-shaped token with no signature, for offline runs only.
fn unsigned_token(role_id: &str, ttl: Duration) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "exp": (Utc::now() + ttl).timestamp(),
        "roleId": role_id,
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}
