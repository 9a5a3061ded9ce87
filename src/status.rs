//! Cache status service.
//!
//! Answers the questions the settings panel asks: is a complete offline
//! copy present, how big is it, when was it captured, and "wipe it".
//!
//! Note that the request interceptor keeps its own private store; a full
//! reset clears this one via [`CacheStatus::clear`] *and* sends the
//! interceptor a `ClearStore` command, and the UI should only claim
//! success once both confirm.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::OfflineError;
use crate::store::{keys, AssetStore};

/// Bytes per megabyte, for display conversion.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub struct CacheStatus {
    store: Arc<AssetStore>,
}

impl CacheStatus {
    pub fn new(store: Arc<AssetStore>) -> Self {
        Self { store }
    }

    /// True only when every component of a snapshot is present: stop list,
    /// route list, cached-audio set, and cached-image set. A partial
    /// download (some present, some missing) reports absent, so an
    /// interrupted `download_all` never masquerades as a usable cache.
    pub fn is_cache_present(&self) -> bool {
        self.store.has_value(keys::STOPS)
            && self.store.has_value(keys::ROUTES)
            && self.store.has_value(keys::AUDIO_URLS)
            && self.store.has_value(keys::IMAGE_URLS)
    }

    pub fn cache_size_bytes(&self) -> u64 {
        self.store.estimate_size_bytes()
    }

    /// Cache size in megabytes for UI display.
    pub fn cache_size_megabytes(&self) -> f64 {
        self.cache_size_bytes() as f64 / BYTES_PER_MB
    }

    /// When the snapshot was captured, if one exists. Read errors count as
    /// absent rather than failing a status render.
    pub fn cache_captured_at(&self) -> Option<DateTime<Utc>> {
        match self.store.get_value(keys::CAPTURED_AT) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Failed to read capture timestamp");
                None
            }
        }
    }

    /// Human-readable age of the snapshot, e.g. "5m ago", or `None` when
    /// no capture timestamp exists.
    pub fn captured_age_display(&self) -> Option<String> {
        self.cache_captured_at().map(age_display)
    }

    /// Delete all offline state owned by the page store. Clearing an
    /// already-empty cache succeeds.
    pub fn clear(&self) -> Result<(), OfflineError> {
        self.store.delete_all()
    }
}

/// Format how long ago a timestamp was, rounding half-up at each unit.
fn age_display(captured_at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - captured_at).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn status() -> (tempfile::TempDir, Arc<AssetStore>, CacheStatus) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = Arc::new(AssetStore::new(dir.path().join("store")).expect("open store"));
        let status = CacheStatus::new(store.clone());
        (dir, store, status)
    }

    fn put(store: &AssetStore, name: &str) {
        store.put_value(name, &Vec::<String>::new()).expect("put value");
    }

    #[test]
    fn test_presence_requires_all_four_values() {
        let (_dir, store, status) = status();
        assert!(!status.is_cache_present());

        let all = [keys::STOPS, keys::ROUTES, keys::AUDIO_URLS, keys::IMAGE_URLS];

        // Every 3-of-4 combination must report absent
        for missing in &all {
            store.delete_all().expect("clear");
            for name in all.iter().filter(|name| name != &missing) {
                put(&store, name);
            }
            assert!(!status.is_cache_present(), "present without {}", missing);
        }

        for name in &all {
            put(&store, name);
        }
        assert!(status.is_cache_present());
    }

    #[test]
    fn test_captured_at_round_trip() {
        let (_dir, store, status) = status();
        assert!(status.cache_captured_at().is_none());

        let now = Utc::now();
        store.put_value(keys::CAPTURED_AT, &now).expect("put timestamp");
        let read = status.cache_captured_at().expect("timestamp present");
        assert_eq!(read.timestamp(), now.timestamp());
        assert_eq!(status.captured_age_display().as_deref(), Some("just now"));
    }

    #[test]
    fn test_clear_twice_succeeds() {
        let (_dir, store, status) = status();
        for name in [keys::STOPS, keys::ROUTES, keys::AUDIO_URLS, keys::IMAGE_URLS] {
            put(&store, name);
        }
        store.put_binary("/a.mp3", b"bytes", "audio/mpeg").expect("put blob");
        assert!(status.is_cache_present());

        status.clear().expect("first clear");
        assert!(!status.is_cache_present());
        assert_eq!(status.cache_size_bytes(), 0);

        status.clear().expect("second clear");
    }

    #[test]
    fn test_age_display_units() {
        assert_eq!(age_display(Utc::now()), "just now");
        assert_eq!(age_display(Utc::now() - Duration::minutes(5)), "5m ago");
        assert_eq!(age_display(Utc::now() - Duration::minutes(90)), "2h ago");
        assert_eq!(age_display(Utc::now() - Duration::minutes(70)), "1h ago");
        assert_eq!(age_display(Utc::now() - Duration::days(2)), "2d ago");
        assert_eq!(
            age_display(Utc::now() - Duration::days(1) - Duration::hours(13)),
            "2d ago"
        );
    }
}
