//! # lichen-resolve
//!
//! The license resolution engine: given a [`PackageDescriptor`], resolve
//! a definitive [`License`] by consulting a priority-ordered chain of
//! external lookup providers, with results cached per (id, version).
//!
//! ## Architecture
//!
//! ```text
//! PackageDescriptor
//!        │
//!        ▼
//!  LicenseResolver ──► LicenseCache (hit? return immediately)
//!        │
//!        ▼  miss
//!  providers, ascending priority:
//!    1. GithubProvider          (declared license URL → GitHub license API)
//!    4. LibrariesIoProvider     (package id → libraries.io, rate-limited)
//!    5. ClearlyDefinedProvider  (id + version → clearlydefined.io)
//!        │
//!        ▼  first Some(License) short-circuits
//!  cache write-back ──► License (or None: "unknown")
//! ```
//!
//! Each provider wraps a `reqwest::Client` configured at construction
//! with the service's base URL and credentials. Provider failures are
//! never fatal: transport errors, non-2xx statuses, and malformed bodies
//! are logged through `tracing` and downgraded to "not found" so the
//! chain always continues and the engine always produces a result.
//!
//! No retries and no fan-out: providers are tried strictly sequentially
//! because any success short-circuits the rest of the chain, and
//! parallel requests would burn rate-limit budget on answers that would
//! be discarded.

pub mod clearly_defined;
mod error;
pub mod github;
pub mod libraries_io;
pub mod provider;
pub mod repo_ref;
mod resolver;

pub use clearly_defined::{ClearlyDefinedConfig, ClearlyDefinedProvider};
pub use error::ProviderError;
pub use github::{GithubConfig, GithubProvider};
pub use libraries_io::{LibrariesIoConfig, LibrariesIoProvider};
pub use provider::LicenseProvider;
pub use repo_ref::{RepoHost, RepoRef};
pub use resolver::{LicenseResolver, ResolverConfig};

pub use lichen_core::{License, PackageDescriptor};
