//! REST client for the role-permissions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use backoffice_core::config::BackendConfig;
use backoffice_core::error::{AppError, ErrorKind};
use backoffice_core::result::AppResult;
use backoffice_core::traits::PermissionSource;
use backoffice_core::types::PermissionPayload;

/// Fetches permission payloads over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPermissionSource {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Backend settings.
    config: BackendConfig,
}

impl HttpPermissionSource {
    /// Creates a client with the configured timeout.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl PermissionSource for HttpPermissionSource {
    async fn fetch_permissions(
        &self,
        role_id: &str,
        access_token: &str,
    ) -> AppResult<PermissionPayload> {
        let url = self.config.permissions_url(role_id);
        debug!(%url, "Fetching role permissions");

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Permission request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Permission endpoint returned an error status");
            return Err(AppError::new(
                ErrorKind::from_http_status(status.as_u16()),
                format!("Permission endpoint returned HTTP {status}"),
            ));
        }

        response.json::<PermissionPayload>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Invalid permission payload: {e}"),
                e,
            )
        })
    }
}
