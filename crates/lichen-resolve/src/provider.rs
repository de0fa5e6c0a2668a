//! The polymorphic lookup-provider capability.
//!
//! Each provider queries one external data source for a package's
//! license. The resolution engine holds an ordered collection of this
//! trait and never branches on a concrete provider's identity. Adding a
//! new data source means implementing the trait and registering it with
//! a priority.

use async_trait::async_trait;
use lichen_core::{License, PackageDescriptor};

/// One external data source capable of supplying a license for a package.
///
/// Implementations must be `Send + Sync` so the engine can be shared
/// across async tasks behind an `Arc`. The trait is object-safe; the
/// engine stores providers as `Box<dyn LicenseProvider>`.
#[async_trait]
pub trait LicenseProvider: Send + Sync {
    /// Ordering within the provider chain; a lower value is tried first.
    fn priority(&self) -> u8;

    /// Human-readable provider name used in log events.
    fn display_name(&self) -> &str;

    /// Attempt to resolve a license for the package.
    ///
    /// Returns `None` both when the source has no answer and when the
    /// lookup failed; providers log the distinction but the engine
    /// treats both as "try the next provider". An error here must never
    /// propagate: the chain always runs to completion.
    async fn resolve(&self, package: &PackageDescriptor) -> Option<License>;
}
