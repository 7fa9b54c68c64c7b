//! Access-token inspection.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use backoffice_auth::{SessionGuard, TokenClaims};
use backoffice_core::config::AppConfig;
use backoffice_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// The access token to decode
    pub token: String,
}

/// What the gate would conclude about a token.
#[derive(Debug, Serialize)]
struct TokenReport {
    valid: bool,
    expires_at: Option<DateTime<Utc>>,
    remaining_seconds: u64,
    role_id: Option<String>,
    claims: TokenClaims,
}

/// Execute the token command
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let guard = SessionGuard::new(&config.auth);
    let report = inspect(&guard, &args.token, Utc::now())?;

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            if report.valid {
                output::print_success("Token is valid");
            } else {
                output::print_warning("Token is expired or has no expiry");
            }
            let expires = report
                .expires_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never set".to_string());
            output::print_kv("Expires", &expires);
            output::print_kv("Remaining", &format!("{}s", report.remaining_seconds));
            output::print_kv("Role id", report.role_id.as_deref().unwrap_or("-"));
            for (claim, value) in &report.claims.extra {
                output::print_kv(claim, &value.to_string());
            }
        }
    }
    Ok(())
}

fn inspect(guard: &SessionGuard, token: &str, now: DateTime<Utc>) -> Result<TokenReport, AppError> {
    let claims = guard.inspect(token)?;
    Ok(TokenReport {
        valid: guard.is_token_valid_at(Some(token), now),
        expires_at: claims.expires_at(),
        remaining_seconds: claims.remaining_ttl_seconds(now),
        role_id: claims.role_id(),
        claims,
    })
}
