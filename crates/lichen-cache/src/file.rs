//! Durable file-backed license cache.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{LicenseCache, WILDCARD_VERSION};

/// Separator between the version and license-id fields of a record.
const FIELD_SEPARATOR: &str = "||";

/// Subdirectory created under the configured root for cache files.
const CACHE_DIR_NAME: &str = "lichen_cache";

/// Durable cache storing one file per package id.
///
/// Each file is named after the case-folded package id and holds
/// newline-delimited `version||licenseId` records. A record with the
/// version `"*"` is a user-set override applying to every version of
/// that id.
///
/// Because each id maps to its own file, concurrent writes for
/// *different* ids never interfere. The write path for a single id is
/// check-then-append and is not atomic: two concurrent writers for the
/// same (id, version) can both pass the existence check and append
/// duplicate records. Reads tolerate this (the exact-match scan returns
/// the first matching record, and duplicates written by this path are
/// identical by construction) so the race is a known, documented
/// limitation rather than a correctness bug.
pub struct FileLicenseCache {
    root: PathBuf,
}

impl FileLicenseCache {
    /// Open (creating if necessary) a cache rooted at
    /// `<root>/lichen_cache/`.
    pub async fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().join(CACHE_DIR_NAME);
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.root.join(id.to_lowercase())
    }

    /// Read the record file for an id, treating "file absent" as empty.
    async fn read_records(&self, id: &str) -> Option<String> {
        match fs::read_to_string(self.entry_path(id)).await {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to read license cache file");
                None
            }
        }
    }
}

#[async_trait]
impl LicenseCache for FileLicenseCache {
    async fn read(&self, id: &str, version: &str) -> Option<String> {
        let contents = self.read_records(id).await?;
        let mut wildcard = None;
        for line in contents.lines() {
            let Some((recorded_version, license_id)) = line.split_once(FIELD_SEPARATOR) else {
                continue;
            };
            if recorded_version == version {
                // Exact match wins over the wildcard regardless of
                // record order within the file.
                return Some(license_id.to_string());
            }
            if recorded_version == WILDCARD_VERSION && wildcard.is_none() {
                wildcard = Some(license_id.to_string());
            }
        }
        wildcard
    }

    async fn write(&self, id: &str, version: &str, license_id: &str) {
        if id.is_empty() || version.is_empty() || license_id.is_empty() {
            return;
        }

        // First-write-wins: an existing record for this exact version
        // (typically a user override) is never replaced.
        if let Some(contents) = self.read_records(id).await {
            let already_recorded = contents
                .lines()
                .filter_map(|line| line.split_once(FIELD_SEPARATOR))
                .any(|(recorded_version, _)| recorded_version == version);
            if already_recorded {
                return;
            }
        }

        let record = format!("{version}{FIELD_SEPARATOR}{license_id}\n");
        let result = async {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.entry_path(id))
                .await?;
            file.write_all(record.as_bytes()).await
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(id, version, error = %err, "failed to append license cache record");
        }
    }
}
