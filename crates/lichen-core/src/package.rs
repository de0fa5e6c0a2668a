//! Package descriptor supplied by the manifest-reading collaborator.

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a [`PackageDescriptor`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The package id was empty or whitespace-only.
    #[error("package id must not be empty")]
    EmptyId,

    /// The package version was empty or whitespace-only.
    #[error("package version must not be empty")]
    EmptyVersion,
}

/// A normalized description of one third-party package, as extracted from
/// its manifest by the caller.
///
/// The descriptor is immutable once constructed and is owned by the
/// caller for the duration of a single resolution request. The version
/// string is opaque; the resolver never interprets the versioning
/// scheme, it only matches versions for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    id: String,
    version: String,
    license_url: Option<String>,
}

impl PackageDescriptor {
    /// Create a descriptor from a package id and version.
    ///
    /// Both fields must be non-empty; the declared license URL is
    /// optional and attached via [`with_license_url`](Self::with_license_url).
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, DescriptorError> {
        let id = id.into();
        let version = version.into();
        if id.trim().is_empty() {
            return Err(DescriptorError::EmptyId);
        }
        if version.trim().is_empty() {
            return Err(DescriptorError::EmptyVersion);
        }
        Ok(Self {
            id,
            version,
            license_url: None,
        })
    }

    /// Attach the license URL declared in the package manifest, if any.
    pub fn with_license_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.license_url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
        self
    }

    /// The package id as declared in the manifest.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The package version, treated as an opaque string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The declared license URL, when the manifest carried one.
    pub fn license_url(&self) -> Option<&str> {
        self.license_url.as_deref()
    }
}

impl std::fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_holds_id_and_version() {
        let pkg = PackageDescriptor::new("Newtonsoft.Json", "13.0.3").unwrap();
        assert_eq!(pkg.id(), "Newtonsoft.Json");
        assert_eq!(pkg.version(), "13.0.3");
        assert_eq!(pkg.license_url(), None);
    }

    #[test]
    fn descriptor_rejects_empty_id() {
        assert_eq!(
            PackageDescriptor::new("", "1.0").unwrap_err(),
            DescriptorError::EmptyId
        );
        assert_eq!(
            PackageDescriptor::new("   ", "1.0").unwrap_err(),
            DescriptorError::EmptyId
        );
    }

    #[test]
    fn descriptor_rejects_empty_version() {
        assert_eq!(
            PackageDescriptor::new("pkg", "").unwrap_err(),
            DescriptorError::EmptyVersion
        );
    }

    #[test]
    fn blank_license_url_is_treated_as_absent() {
        let pkg = PackageDescriptor::new("pkg", "1.0")
            .unwrap()
            .with_license_url("  ");
        assert_eq!(pkg.license_url(), None);
    }

    #[test]
    fn license_url_is_preserved() {
        let pkg = PackageDescriptor::new("pkg", "1.0")
            .unwrap()
            .with_license_url("https://github.com/org/pkg/blob/master/LICENSE");
        assert_eq!(
            pkg.license_url(),
            Some("https://github.com/org/pkg/blob/master/LICENSE")
        );
    }

    #[test]
    fn display_joins_id_and_version() {
        let pkg = PackageDescriptor::new("pkg-a", "1.8").unwrap();
        assert_eq!(pkg.to_string(), "pkg-a@1.8");
    }
}
