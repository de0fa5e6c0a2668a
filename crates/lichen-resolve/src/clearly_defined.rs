//! ClearlyDefined definitions provider.
//!
//! ClearlyDefined (<https://clearlydefined.io>) curates license metadata
//! per package coordinate. The provider queries the definitions API for
//! the NuGet namespace and accepts the curated "declared" license when
//! it is a real value rather than a placeholder.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use lichen_core::{is_known_license, License, PackageDescriptor};

use crate::error::ProviderError;
use crate::provider::LicenseProvider;

const DEFAULT_BASE_URL: &str = "https://api.clearlydefined.io";

/// Configuration for the ClearlyDefined provider.
#[derive(Debug, Clone)]
pub struct ClearlyDefinedConfig {
    /// Base URL of the definitions API. Overridable for tests.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClearlyDefinedConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Point the provider at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ClearlyDefinedConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DefinitionResponse {
    licensed: Option<Licensed>,
}

#[derive(Debug, Deserialize)]
struct Licensed {
    declared: Option<String>,
}

impl Licensed {
    fn license(&self) -> Option<License> {
        self.declared
            .as_deref()
            .filter(|declared| is_known_license(declared))
            .map(License::from_id)
    }
}

/// Lookup provider backed by the ClearlyDefined definitions API.
pub struct ClearlyDefinedProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ClearlyDefinedProvider {
    /// Build the provider from configuration.
    pub fn new(config: ClearlyDefinedConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    async fn fetch_definition(
        &self,
        package: &PackageDescriptor,
    ) -> Result<Option<License>, ProviderError> {
        // Coordinate shape: type/provider/namespace/name/revision, with
        // "-" for the empty NuGet namespace.
        let endpoint = format!(
            "{}/definitions/nuget/nuget/-/{}/{}",
            self.base_url,
            package.id(),
            package.version()
        );

        let response = self
            .client
            .get(&endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(package = %package, "ClearlyDefined has no definition for package");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "ClearlyDefined",
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DefinitionResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Deserialization { endpoint, source })?;

        Ok(parsed.licensed.as_ref().and_then(Licensed::license))
    }
}

#[async_trait]
impl LicenseProvider for ClearlyDefinedProvider {
    fn priority(&self) -> u8 {
        5
    }

    fn display_name(&self) -> &str {
        "Clearly Defined (https://clearlydefined.io)"
    }

    async fn resolve(&self, package: &PackageDescriptor) -> Option<License> {
        tracing::info!(package = %package, "Clearly Defined, retrieving license");
        match self.fetch_definition(package).await {
            Ok(license) => license,
            Err(err) => {
                tracing::warn!(package = %package, error = %err, "ClearlyDefined lookup failed");
                None
            }
        }
    }
}
