//! # lichen-cache
//!
//! Caching of resolved license identifiers per (package id, version).
//!
//! Third-party lookup services (GitHub, ClearlyDefined, Libraries.io) are
//! slow and rate-limited; caching makes repeated resolution of the same
//! dependency set cheap and keeps the tool inside upstream quotas.
//!
//! ## Capability
//!
//! The [`LicenseCache`] trait is the only surface the resolution engine
//! sees. Two implementations are provided:
//!
//! - [`FileLicenseCache`]: durable, one file per package id, survives
//!   process restarts.
//! - [`MemoryLicenseCache`]: transient, lives for the process lifetime,
//!   safe under concurrent resolution requests.
//!
//! ## Wildcard overrides
//!
//! An entry stored under the special version `"*"` applies to every
//! version of that package id. Users set these by hand for internal or
//! non-standard libraries where no upstream service will ever have an
//! answer. An exact-version entry always takes precedence over the
//! wildcard when both exist.
//!
//! ## Trust model
//!
//! Entries are never expired or revalidated; a cached value is trusted
//! until the user clears it manually. Writes are first-write-wins so a
//! manual override is never clobbered by a later automatic resolution.

use async_trait::async_trait;

mod file;
mod memory;

pub use file::FileLicenseCache;
pub use memory::MemoryLicenseCache;

/// The version token that matches any queried version of a package id.
pub const WILDCARD_VERSION: &str = "*";

/// Key/value store mapping (package id, version) to a license identifier.
///
/// Implementations must be `Send + Sync`; the engine shares one cache
/// across concurrent resolution requests behind an `Arc`.
#[async_trait]
pub trait LicenseCache: Send + Sync {
    /// Look up the license identifier cached for (`id`, `version`).
    ///
    /// The id is case-folded before lookup. An exact version match is
    /// returned when present; otherwise a wildcard (`"*"`) entry for the
    /// id, if one exists; otherwise `None`. A miss is not an error.
    async fn read(&self, id: &str, version: &str) -> Option<String>;

    /// Record a resolved license identifier for (`id`, `version`).
    ///
    /// Silently no-ops when any argument is empty, and when an entry for
    /// the exact (id, version) already exists: writes are idempotent and
    /// first-write-wins. Storage failures are logged, not surfaced:
    /// callers cannot distinguish "cached" from "not cached".
    async fn write(&self, id: &str, version: &str, license_id: &str);
}
