//! Back-office route gate runner.
//!
//! Drives the layout controller against the configured backend. Navigation
//! events are read from stdin, one per line, and each settled outcome is
//! written to stdout as a JSON line.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use backoffice_auth::{HttpPermissionSource, LayoutController, LayoutOutcome, MemorySessionStore};
use backoffice_core::config::AppConfig;
use backoffice_core::error::AppError;
use backoffice_core::traits::SessionStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Runner error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("BACKOFFICE_CONFIG") {
        Ok(path) => AppConfig::load_from(path),
        Err(_) => {
            let env =
                std::env::var("BACKOFFICE_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// One line of input.
#[derive(Debug, PartialEq, Eq)]
enum Event {
    Navigate(String),
    Back,
    Refresh,
    SignIn { token: String, user: String },
}

impl Event {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if line.starts_with('/') {
            return Some(Self::Navigate(line.to_string()));
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "back" => Some(Self::Back),
            "refresh" => Some(Self::Refresh),
            "sign-in" => {
                let (token, user) = rest.trim().split_once(' ')?;
                Some(Self::SignIn {
                    token: token.to_string(),
                    user: user.trim().to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Main run loop
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting back-office gate v{}", env!("CARGO_PKG_VERSION"));

    let source = Arc::new(HttpPermissionSource::new(&config.backend)?);
    tracing::info!(backend = %config.backend.base_url, "Permission source ready");

    let mut store = MemorySessionStore::new();
    if let Ok(token) = std::env::var("BACKOFFICE_ACCESS_TOKEN") {
        store.set_item(&config.auth.token_storage_key, &token);
    }
    if let Ok(user) = std::env::var("BACKOFFICE_USER") {
        store.set_item(&config.auth.user_storage_key, &user);
    }

    let mut layout = LayoutController::from_config(&config, store, source)?;
    layout.hydrate();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(event) = Event::parse(&line) else {
            if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
                tracing::warn!(input = %line.trim(), "Ignoring unrecognized input");
            }
            continue;
        };

        let outcome = match event {
            Event::Navigate(path) => Some(layout.navigate(&path).await),
            Event::Back => layout.go_back().await,
            Event::Refresh => Some(layout.refresh().await),
            Event::SignIn { token, user } => {
                layout.sign_in(&token, &user);
                Some(layout.refresh().await)
            }
        };

        match outcome {
            Some(outcome) => emit(&outcome)?,
            None => tracing::warn!("No previous path to go back to"),
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn emit(outcome: &LayoutOutcome) -> Result<(), AppError> {
    println!("{}", serde_json::to_string(outcome)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(Event::parse("/leads"), Some(Event::Navigate("/leads".to_string())));
        assert_eq!(Event::parse("  back "), Some(Event::Back));
        assert_eq!(Event::parse("refresh"), Some(Event::Refresh));
        assert_eq!(
            Event::parse(r#"sign-in abc.def.ghi {"role":"admin","roleId":1}"#),
            Some(Event::SignIn {
                token: "abc.def.ghi".to_string(),
                user: r#"{"role":"admin","roleId":1}"#.to_string(),
            })
        );
    }

    #[test]
    fn test_parse_ignores_noise() {
        assert_eq!(Event::parse(""), None);
        assert_eq!(Event::parse("# comment"), None);
        assert_eq!(Event::parse("sign-in onlytoken"), None);
        assert_eq!(Event::parse("dance"), None);
    }
}
