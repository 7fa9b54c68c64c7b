//! CLI command definitions and dispatch.

pub mod check;
pub mod config;
pub mod roles;
pub mod routes;
pub mod token;

use std::path::Path;

use clap::{Parser, Subcommand};

use backoffice_auth::{PermissionIndex, PermissionSnapshot};
use backoffice_core::config::AppConfig;
use backoffice_core::error::{AppError, ErrorKind};
use backoffice_core::types::{CapabilityCodes, PermissionPayload};

use crate::output::OutputFormat;

/// Back office route gate: inspect routing tables and access decisions
#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; when omitted, config/default.toml and the env overlay are used
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay (config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the gate offline over a list of paths
    Check(check::CheckArgs),
    /// List guarded routes, optionally against saved permissions
    Routes(routes::RoutesArgs),
    /// List role landing pages and where each role ends up
    Roles(roles::RolesArgs),
    /// Decode an access token and report its expiry
    Token(token::TokenArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Check(args) => check::execute(args, &self.load_config()?, self.format).await,
            Commands::Routes(args) => routes::execute(args, &self.load_config()?, self.format),
            Commands::Roles(args) => roles::execute(args, &self.load_config()?, self.format),
            Commands::Token(args) => token::execute(args, &self.load_config()?, self.format),
            Commands::Config(args) => config::execute(args, self).await,
        }
    }

    /// Loads the configuration selected by `--config` / `--env`.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Helper: read a saved permissions response and index it
pub fn load_index(
    path: impl AsRef<Path>,
    codes: &CapabilityCodes,
) -> Result<PermissionIndex, AppError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::with_source(
            ErrorKind::NotFound,
            format!("Cannot read permissions file '{}'", path.display()),
            e,
        )
    })?;
    let payload: PermissionPayload = serde_json::from_str(&raw)?;
    let snapshot = PermissionSnapshot::from_payload(payload);
    Ok(PermissionIndex::new(&snapshot, codes))
}
