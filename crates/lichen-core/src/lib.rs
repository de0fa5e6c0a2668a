//! # lichen-core
//!
//! Foundational domain types for the lichen license resolution engine.
//!
//! A software-bill-of-materials generator hands the resolver one
//! [`PackageDescriptor`] per dependency it inventories and expects back a
//! [`License`], or nothing when no provider can determine one. These
//! types are deliberately small and transport-agnostic: everything that
//! talks to the network lives in `lichen-resolve`, and everything that
//! persists results lives in `lichen-cache`.
//!
//! ## Sentinel license values
//!
//! Upstream metadata services frequently report placeholder strings
//! ("unknown", "other") where a real license identifier should be. The
//! [`license::is_known_license`] rule centralizes the case-insensitive
//! exclusion of those values so every provider applies it identically.

pub mod license;
pub mod package;

pub use license::{is_known_license, License, UNKNOWN_LICENSE_IDS};
pub use package::{DescriptorError, PackageDescriptor};
