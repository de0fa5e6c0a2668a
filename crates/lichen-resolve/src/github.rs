//! GitHub license-metadata provider.
//!
//! Interprets the package's declared license URL into repository
//! coordinates and asks the GitHub license API
//! (`GET /repos/{owner}/{repo}/license?ref={ref}`) what license the
//! repository carries. This is the highest-preference provider: when a
//! manifest links straight at a license file in the project repository,
//! GitHub's own classification of that repository is the most direct
//! answer available.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use lichen_core::{License, PackageDescriptor};

use crate::error::ProviderError;
use crate::provider::LicenseProvider;
use crate::repo_ref::{parse_license_url, RepoRef};

/// Public GitHub REST API base.
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Configuration for the GitHub provider.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL of the GitHub REST API. Overridable for tests.
    pub base_url: String,
    /// Optional basic-auth credentials. Unauthenticated requests work
    /// but are subject to a much lower rate limit.
    pub credentials: Option<(String, String)>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GithubConfig {
    /// Configuration for unauthenticated access to the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: 30,
        }
    }

    /// Attach basic-auth credentials (username + personal access token).
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Point the provider at a different API base (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    license: Option<LicenseInfo>,
}

#[derive(Debug, Deserialize)]
struct LicenseInfo {
    spdx_id: Option<String>,
    name: Option<String>,
}

/// Lookup provider backed by the GitHub license-metadata endpoint.
pub struct GithubProvider {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl GithubProvider {
    /// Build the provider from configuration.
    pub fn new(config: GithubConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                // The GitHub API rejects requests without a user agent.
                headers.insert(
                    reqwest::header::USER_AGENT,
                    reqwest::header::HeaderValue::from_static("lichen-resolve"),
                );
                headers
            })
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
        })
    }

    async fn fetch_license(&self, repo_ref: &RepoRef) -> Result<Option<License>, ProviderError> {
        let endpoint = format!(
            "{}/repos/{}/{}/license",
            self.base_url, repo_ref.owner, repo_ref.repo
        );
        let mut request = self
            .client
            .get(&endpoint)
            .query(&[("ref", repo_ref.git_ref.as_str())]);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|source| ProviderError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(
                owner = %repo_ref.owner,
                repo = %repo_ref.repo,
                "GitHub has no license metadata for repository"
            );
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "GitHub",
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LicenseResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Deserialization { endpoint, source })?;

        Ok(parsed.license.and_then(|info| {
            let id = info.spdx_id.filter(|id| !id.is_empty())?;
            let name = info.name.filter(|name| !name.is_empty()).unwrap_or_else(|| id.clone());
            Some(License::new(id, name))
        }))
    }
}

#[async_trait]
impl LicenseProvider for GithubProvider {
    fn priority(&self) -> u8 {
        1
    }

    fn display_name(&self) -> &str {
        "GitHub (https://api.github.com)"
    }

    async fn resolve(&self, package: &PackageDescriptor) -> Option<License> {
        let url = package.license_url()?;
        let Some(repo_ref) = parse_license_url(url) else {
            tracing::debug!(package = %package, url, "declared license URL is not a recognized repository URL");
            return None;
        };

        tracing::info!(
            package = %package,
            owner = %repo_ref.owner,
            repo = %repo_ref.repo,
            git_ref = %repo_ref.git_ref,
            "GitHub, retrieving license"
        );

        match self.fetch_license(&repo_ref).await {
            Ok(license) => license,
            Err(err) => {
                // Never fatal: log and let the chain continue.
                tracing::warn!(package = %package, error = %err, "GitHub license lookup failed");
                None
            }
        }
    }
}
