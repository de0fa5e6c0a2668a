//! The resolution engine: cache lookup, provider chain, cache write-back.

use std::sync::Arc;

use lichen_cache::LicenseCache;
use lichen_core::{License, PackageDescriptor};

use crate::clearly_defined::{ClearlyDefinedConfig, ClearlyDefinedProvider};
use crate::error::ProviderError;
use crate::github::{GithubConfig, GithubProvider};
use crate::libraries_io::{LibrariesIoConfig, LibrariesIoProvider};
use crate::provider::LicenseProvider;

/// Configuration assembling the standard provider chain.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// GitHub provider settings (always registered).
    pub github: GithubConfig,
    /// ClearlyDefined provider settings (always registered).
    pub clearly_defined: ClearlyDefinedConfig,
    /// Libraries.io settings. The service requires an API key, so the
    /// provider is registered only when this is present.
    pub libraries_io: Option<LibrariesIoConfig>,
}

impl ResolverConfig {
    /// Build a [`LicenseResolver`] with the standard provider chain over
    /// the given cache.
    pub fn build(self, cache: Arc<dyn LicenseCache>) -> Result<LicenseResolver, ProviderError> {
        let mut providers: Vec<Box<dyn LicenseProvider>> = vec![
            Box::new(GithubProvider::new(self.github)?),
            Box::new(ClearlyDefinedProvider::new(self.clearly_defined)?),
        ];
        if let Some(config) = self.libraries_io {
            providers.push(Box::new(LibrariesIoProvider::new(config)?));
        }
        Ok(LicenseResolver::new(cache, providers))
    }
}

/// Resolves package licenses through a priority-ordered provider chain,
/// consulting and populating a [`LicenseCache`].
///
/// Per request the pipeline is strictly sequential:
/// cache lookup → provider chain → cache write-back → result. A cache
/// hit terminates immediately and is never revalidated against the
/// providers. Multiple independent requests may run concurrently; the
/// engine itself holds no per-request state.
pub struct LicenseResolver {
    cache: Arc<dyn LicenseCache>,
    providers: Vec<Box<dyn LicenseProvider>>,
}

impl LicenseResolver {
    /// Create a resolver over an explicit provider collection.
    ///
    /// Providers are sorted ascending by [`LicenseProvider::priority`];
    /// relative order of equal priorities is preserved.
    pub fn new(cache: Arc<dyn LicenseCache>, mut providers: Vec<Box<dyn LicenseProvider>>) -> Self {
        providers.sort_by_key(|provider| provider.priority());
        Self { cache, providers }
    }

    /// Resolve the license for one package.
    ///
    /// Returns `None` ("unknown") only when the cache has no entry and
    /// every provider reported not-found or failed. No single provider
    /// failure can abort the chain.
    pub async fn resolve(&self, package: &PackageDescriptor) -> Option<License> {
        if let Some(license_id) = self.cache.read(package.id(), package.version()).await {
            tracing::debug!(package = %package, license = %license_id, "license served from cache");
            return Some(License::from_id(license_id));
        }

        for provider in &self.providers {
            tracing::debug!(
                package = %package,
                provider = provider.display_name(),
                "consulting provider"
            );
            if let Some(license) = provider.resolve(package).await {
                tracing::info!(
                    package = %package,
                    provider = provider.display_name(),
                    license = %license,
                    "license resolved"
                );
                self.cache
                    .write(package.id(), package.version(), &license.id)
                    .await;
                return Some(license);
            }
        }

        tracing::info!(package = %package, "no provider could determine a license");
        None
    }
}
