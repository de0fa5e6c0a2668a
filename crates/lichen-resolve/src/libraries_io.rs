//! Libraries.io package-intelligence provider.
//!
//! Libraries.io (<https://libraries.io>) indexes package metadata across
//! ecosystems. The API requires a key, is not version-scoped, and is
//! rate-limited to 60 requests per minute, so the provider sleeps a fixed
//! delay before every request to stay under that limit.
//!
//! Because the response describes the package as a whole rather than one
//! release, the reported license is only trusted when the requested
//! version appears in the response's version list. This guards against
//! stale index data being attributed to a release libraries.io has never
//! seen.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use lichen_core::{is_known_license, License, PackageDescriptor};

use crate::error::ProviderError;
use crate::provider::LicenseProvider;

const DEFAULT_BASE_URL: &str = "https://libraries.io/api";

/// Pause before each request; keeps a sustained run of lookups safely
/// under the documented 60 requests/minute limit.
const RATE_LIMIT_DELAY: Duration = Duration::from_millis(1010);

/// Configuration for the Libraries.io provider.
#[derive(Debug, Clone)]
pub struct LibrariesIoConfig {
    /// Base URL of the libraries.io API. Overridable for tests.
    pub base_url: String,
    /// API key, sent as the `api_key` query parameter.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LibrariesIoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Point the provider at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct PackageResponse {
    licenses: Option<String>,
    repository_license: Option<String>,
    #[serde(default)]
    versions: Vec<VersionInfo>,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    number: String,
}

impl PackageResponse {
    /// Prefer the normalized `licenses` field, then the repository
    /// license, excluding sentinel placeholder values from both.
    fn license(&self) -> Option<License> {
        [self.licenses.as_deref(), self.repository_license.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| is_known_license(candidate))
            .map(License::from_id)
    }

    fn knows_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v.number == version)
    }
}

/// Lookup provider backed by the libraries.io package API.
pub struct LibrariesIoProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LibrariesIoProvider {
    /// Build the provider from configuration.
    pub fn new(config: LibrariesIoConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn fetch_package(
        &self,
        package: &PackageDescriptor,
    ) -> Result<Option<License>, ProviderError> {
        let endpoint = format!("{}/nuget/{}", self.base_url, package.id());

        // Blocks only this provider's request path; other providers and
        // concurrent resolutions are unaffected.
        tokio::time::sleep(RATE_LIMIT_DELAY).await;

        let response = self
            .client
            .get(&endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(package = %package, "Libraries.io has no entry for package");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Libraries.io",
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PackageResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                // Bad JSON from the index happens; treat as not-found.
                tracing::warn!(package = %package, error = %err, "Libraries.io returned a malformed body");
                return Ok(None);
            }
        };

        if !parsed.knows_version(package.version()) {
            tracing::info!(
                package = %package,
                "Libraries.io entry does not list the requested version"
            );
            return Ok(None);
        }
        Ok(parsed.license())
    }
}

#[async_trait]
impl LicenseProvider for LibrariesIoProvider {
    fn priority(&self) -> u8 {
        4
    }

    fn display_name(&self) -> &str {
        "Libraries.io (https://libraries.io)"
    }

    async fn resolve(&self, package: &PackageDescriptor) -> Option<License> {
        tracing::info!(package = %package, "Libraries.io, retrieving license");
        match self.fetch_package(package).await {
            Ok(license) => license,
            Err(err) => {
                tracing::warn!(package = %package, error = %err, "Libraries.io lookup failed");
                None
            }
        }
    }
}
