use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OfflineError;

/// Application name used for the default store directory
const APP_NAME: &str = "tourcache";

/// File name of the write probe used by `is_supported`
const PROBE_FILE: &str = ".probe";

/// A binary entry read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAsset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Sidecar metadata persisted next to each blob. The full source URL is
/// kept so a hash collision reads back as absent instead of as the wrong
/// asset.
#[derive(Debug, Serialize, Deserialize)]
struct BlobMeta {
    url: String,
    content_type: String,
}

/// Durable, origin-scoped storage for offline tour content.
///
/// Blobs are stored as files named by an FNV-1a hash of their source URL,
/// each with a JSON sidecar; structured values are JSON files named by
/// their logical key. Writes are last-writer-wins per key; no multi-key
/// atomicity is provided or assumed by callers.
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, OfflineError> {
        let root = root.into();
        std::fs::create_dir_all(root.join("blobs"))?;
        std::fs::create_dir_all(root.join("values"))?;
        Ok(Self { root })
    }

    /// Default store location under the platform cache directory,
    /// e.g. `~/.cache/tourcache`. `None` when the platform has no cache
    /// directory, which `is_supported` treats as an unsupported
    /// environment.
    pub fn default_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(APP_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the environment actually provides the storage this crate
    /// needs. Probes with a real write because a directory can exist and
    /// still be read-only. Checked before any other operation; when false
    /// the whole offline feature is inert and the UI should say so.
    pub fn is_supported(&self) -> bool {
        let probe = self.root.join(PROBE_FILE);
        match std::fs::write(&probe, b"probe") {
            Ok(()) => {
                let _ = std::fs::remove_file(&probe);
                true
            }
            Err(e) => {
                warn!(error = %e, root = %self.root.display(), "Offline storage unavailable");
                false
            }
        }
    }

    fn blob_path(&self, url: &str) -> PathBuf {
        self.root
            .join("blobs")
            .join(format!("{:016x}.bin", fnv1a64(url.as_bytes())))
    }

    fn blob_meta_path(&self, url: &str) -> PathBuf {
        self.root
            .join("blobs")
            .join(format!("{:016x}.json", fnv1a64(url.as_bytes())))
    }

    fn value_path(&self, name: &str) -> PathBuf {
        self.root.join("values").join(format!("{}.json", name))
    }

    /// Store or overwrite the binary entry for `url`.
    pub fn put_binary(
        &self,
        url: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), OfflineError> {
        let meta = BlobMeta {
            url: url.to_string(),
            content_type: content_type.to_string(),
        };
        std::fs::write(self.blob_path(url), bytes)?;
        std::fs::write(self.blob_meta_path(url), serde_json::to_vec(&meta)?)?;
        debug!(url = %url, size = bytes.len(), "Stored blob");
        Ok(())
    }

    /// Read the binary entry for `url`, or `None` if absent.
    pub fn get_binary(&self, url: &str) -> Result<Option<StoredAsset>, OfflineError> {
        let meta_path = self.blob_meta_path(url);
        if !meta_path.exists() {
            return Ok(None);
        }

        let meta: BlobMeta = serde_json::from_slice(&std::fs::read(&meta_path)?)?;
        if meta.url != url {
            // Hash collision with a different URL
            warn!(requested = %url, stored = %meta.url, "Blob key collision, treating as absent");
            return Ok(None);
        }

        let path = self.blob_path(url);
        if !path.exists() {
            // Blob evicted out from under its sidecar
            return Ok(None);
        }

        Ok(Some(StoredAsset {
            content_type: meta.content_type,
            bytes: std::fs::read(&path)?,
        }))
    }

    /// Store or overwrite a structured value under a logical name.
    pub fn put_value<T: Serialize>(&self, name: &str, value: &T) -> Result<(), OfflineError> {
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(self.value_path(name), contents)?;
        Ok(())
    }

    /// Read a structured value, or `None` if absent.
    pub fn get_value<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, OfflineError> {
        let path = self.value_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Whether a structured value is present, without parsing it.
    pub fn has_value(&self, name: &str) -> bool {
        self.value_path(name).exists()
    }

    /// Remove every blob and every structured value. Clearing an
    /// already-empty store succeeds; a partial failure is surfaced so the
    /// caller does not report success for a half-cleared store.
    pub fn delete_all(&self) -> Result<(), OfflineError> {
        remove_dir_if_exists(&self.root.join("blobs"))?;
        remove_dir_if_exists(&self.root.join("values"))?;
        std::fs::create_dir_all(self.root.join("blobs"))?;
        std::fs::create_dir_all(self.root.join("values"))?;
        Ok(())
    }

    /// Total byte length of every blob currently on disk. Enumerates the
    /// actual files rather than trusting a counter, since the host may
    /// have evicted blobs behind our back. Display-only approximation.
    pub fn estimate_size_bytes(&self) -> u64 {
        let entries = match std::fs::read_dir(self.root.join("blobs")) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        entries
            .flatten()
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "bin"))
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum()
    }
}

fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// FNV-1a, used for stable blob file names. Stability across runs matters
/// here, which rules out `DefaultHasher`.
fn fnv1a64(data: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    data.iter()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}
