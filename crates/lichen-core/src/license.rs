//! License descriptors and the sentinel-value exclusion rule.

use serde::{Deserialize, Serialize};

/// Placeholder values that upstream services report where a real license
/// identifier should be. Compared case-insensitively; a declared license
/// matching one of these is treated as "no license determined".
pub const UNKNOWN_LICENSE_IDS: &[&str] = &["unknown", "other"];

/// Returns true when `value` is a usable license identifier: non-blank
/// and not one of the [`UNKNOWN_LICENSE_IDS`] sentinels.
pub fn is_known_license(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !UNKNOWN_LICENSE_IDS
            .iter()
            .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

/// A resolved license for one package.
///
/// `id` is the short machine identifier: an SPDX code when the source
/// provides one, otherwise the raw declared string. `name` is the
/// human-readable form and may equal `id` when the source supplies no
/// display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Short identifier, e.g. `MIT` or `Apache-2.0`.
    pub id: String,
    /// Human-readable name, e.g. `MIT License`.
    pub name: String,
}

impl License {
    /// Create a license with distinct id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Create a license whose display name equals its identifier, as
    /// aggregator services that only report a declared string produce.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.id == self.name {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.id, self.name)
        }
    }
}
