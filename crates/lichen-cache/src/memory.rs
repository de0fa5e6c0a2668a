//! Transient in-memory license cache.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{LicenseCache, WILDCARD_VERSION};

/// In-memory cache keyed by a composite `"id/version"` string.
///
/// Lives for the process lifetime; nothing is persisted. Safe for
/// concurrent use from many resolution requests: inserts are atomic and
/// the first writer for a key wins, so a value read once stays stable.
#[derive(Default)]
pub struct MemoryLicenseCache {
    entries: DashMap<String, String>,
}

impl MemoryLicenseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: &str, version: &str) -> String {
        format!("{}/{version}", id.to_lowercase())
    }
}

#[async_trait]
impl LicenseCache for MemoryLicenseCache {
    async fn read(&self, id: &str, version: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(&Self::key(id, version)) {
            return Some(entry.value().clone());
        }
        self.entries
            .get(&Self::key(id, WILDCARD_VERSION))
            .map(|entry| entry.value().clone())
    }

    async fn write(&self, id: &str, version: &str, license_id: &str) {
        if id.is_empty() || version.is_empty() || license_id.is_empty() {
            return;
        }
        self.entries
            .entry(Self::key(id, version))
            .or_insert_with(|| license_id.to_string());
    }
}
