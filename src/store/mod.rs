//! Persistent asset store for offline tour data.
//!
//! Two kinds of entries live here: binary blobs keyed by their source URL
//! (audio, images, opportunistically cached responses) and small JSON
//! values keyed by a fixed set of logical names. The store knows nothing
//! about tour semantics; the download orchestrator and cache status
//! service decide what a complete snapshot looks like.

pub mod asset;

pub use asset::{AssetStore, StoredAsset};

/// Logical names for the structured values that make up an offline
/// snapshot. The presence check in `CacheStatus` requires the first four;
/// the capture timestamp is informational.
pub mod keys {
    pub const STOPS: &str = "offline.stops";
    pub const ROUTES: &str = "offline.routes";
    pub const AUDIO_URLS: &str = "offline.audio_urls";
    pub const IMAGE_URLS: &str = "offline.image_urls";
    pub const CAPTURED_AT: &str = "offline.captured_at";
}
