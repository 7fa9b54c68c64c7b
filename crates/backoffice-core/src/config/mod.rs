//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod auth;
pub mod backend;
pub mod logging;
pub mod routing;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;
pub use self::routing::{RouteEntry, RoutingConfig};

use crate::error::AppError;

/// Environment variable prefix for overrides, e.g. `BACKOFFICE__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "BACKOFFICE";

/// Largest accepted clock-skew allowance: one day.
pub const MAX_EXPIRY_LEEWAY_SECONDS: u64 = 86_400;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Permission backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session and public-route settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Guarded routes, role landing pages, capability codes.
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `BACKOFFICE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        tracing::debug!(env, "Loading configuration");
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from one explicit file plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::configuration(format!(
                "Configuration file '{}' does not exist",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "Loading configuration");
        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.auth.login_path.starts_with('/') {
            return Err(AppError::configuration(format!(
                "Login path '{}' must start with '/'",
                self.auth.login_path
            )));
        }
        if self.routing.routes.iter().any(|r| r.path == self.auth.login_path) {
            return Err(AppError::configuration(
                "The login path cannot be a permission-checked route",
            ));
        }
        if self.auth.expiry_leeway_seconds > MAX_EXPIRY_LEEWAY_SECONDS {
            return Err(AppError::configuration(format!(
                "Expiry leeway of {}s exceeds the maximum of {}s",
                self.auth.expiry_leeway_seconds, MAX_EXPIRY_LEEWAY_SECONDS
            )));
        }
        self.routing.validate()
    }
}
