use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{info, warn};

use crate::api::TourApi;
use crate::error::OfflineError;
use crate::models::{DownloadProgress, TourStop};
use crate::store::{keys, AssetStore};

/// Handle returned by `add_progress_listener`, used to unsubscribe.
/// Closures are not comparable, so removal goes through an id rather than
/// the callback itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type ProgressListener = Box<dyn Fn(&DownloadProgress) + Send + Sync>;

struct ProgressState {
    progress: DownloadProgress,
    listeners: Vec<(ListenerId, ProgressListener)>,
    next_listener_id: u64,
}

/// Performs one complete, best-effort offline snapshot.
///
/// At most one download runs at a time; a `download_all` call while
/// another is in flight is rejected with `DownloadInProgress` rather than
/// racing two writers over the same snapshot keys.
pub struct DownloadOrchestrator<A: TourApi> {
    api: A,
    store: Arc<AssetStore>,
    state: Mutex<ProgressState>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<A: TourApi> DownloadOrchestrator<A> {
    pub fn new(api: A, store: Arc<AssetStore>) -> Self {
        Self {
            api,
            store,
            state: Mutex::new(ProgressState {
                progress: DownloadProgress::default(),
                listeners: Vec::new(),
                next_listener_id: 0,
            }),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Subscribe to progress updates. The listener is invoked immediately
    /// with the current progress, then synchronously on every subsequent
    /// change; no update is coalesced away. Listeners must not call back
    /// into the orchestrator.
    pub fn add_progress_listener(
        &self,
        listener: impl Fn(&DownloadProgress) + Send + Sync + 'static,
    ) -> ListenerId {
        // A listener that panicked poisons the lock; the counters are
        // still coherent, so recover rather than wedge progress reporting
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ListenerId(state.next_listener_id);
        state.next_listener_id += 1;
        listener(&state.progress);
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop delivery to a previously registered listener. Unknown ids are
    /// ignored.
    pub fn remove_progress_listener(&self, id: ListenerId) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Snapshot of the current progress counters.
    pub fn current_progress(&self) -> DownloadProgress {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .progress
            .clone()
    }

    /// Mutate progress and notify every listener, synchronously with the
    /// mutation.
    fn update_progress(&self, mutate: impl FnOnce(&mut DownloadProgress)) {
        let state = &mut *self.state.lock().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut state.progress);
        for (_, listener) in &state.listeners {
            listener(&state.progress);
        }
    }

    /// Download and persist everything the tour needs offline.
    ///
    /// Individual asset failures are logged, skipped, and still counted
    /// toward progress, so the bar reaches 100% and the call succeeds with
    /// a thinner snapshot. Only an unusable store, a failed top-level
    /// stop/route fetch, or a failed structured write aborts the attempt;
    /// whatever was written before the failure stays on disk and the
    /// presence check decides whether it counts as usable.
    pub async fn download_all(&self) -> Result<(), OfflineError> {
        if !self.store.is_supported() {
            return Err(OfflineError::Unsupported);
        }

        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| OfflineError::DownloadInProgress)?;

        // A new attempt always starts from zero
        self.update_progress(|progress| {
            *progress = DownloadProgress::default();
        });

        match self.capture_snapshot().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Offline download failed");
                self.update_progress(|progress| {
                    progress.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    async fn capture_snapshot(&self) -> Result<(), OfflineError> {
        // Without the stop list the asset URL set cannot even be
        // enumerated, so these two fetches are all-or-nothing.
        let stops = self.api.fetch_stops().await?;
        let routes = self.api.fetch_routes().await?;

        let audio_urls = distinct_audio_urls(&stops);
        let image_urls = distinct_image_urls(&stops);

        // Total is fixed before any further I/O so the progress bar has a
        // correct denominator from the start.
        let total = 2 + audio_urls.len() + image_urls.len();
        self.update_progress(|progress| {
            progress.total = total;
        });
        info!(
            stops = stops.len(),
            routes = routes.len(),
            audio = audio_urls.len(),
            images = image_urls.len(),
            "Starting offline download"
        );

        // Structured documents are persisted before any binary fetch; a
        // failure here is fatal since the snapshot is useless without them
        self.store.put_value(keys::STOPS, &stops)?;
        self.update_progress(|progress| {
            progress.downloaded += 1;
        });
        self.store.put_value(keys::ROUTES, &routes)?;
        self.update_progress(|progress| {
            progress.downloaded += 1;
        });

        let cached_audio = self.cache_assets(&audio_urls, "audio").await;
        let cached_images = self.cache_assets(&image_urls, "image").await;

        self.store.put_value(keys::AUDIO_URLS, &cached_audio)?;
        self.store.put_value(keys::IMAGE_URLS, &cached_images)?;
        self.store.put_value(keys::CAPTURED_AT, &Utc::now())?;

        self.update_progress(|progress| {
            progress.completed = true;
        });
        info!(
            audio_cached = cached_audio.len(),
            images_cached = cached_images.len(),
            "Offline download complete"
        );
        Ok(())
    }

    /// Fetch and store each asset, returning the URLs that made it into
    /// the store. Every attempt counts toward progress, success or not.
    async fn cache_assets(&self, urls: &[String], kind: &str) -> Vec<String> {
        let mut cached = Vec::with_capacity(urls.len());
        for url in urls {
            match self.api.fetch_asset(url).await {
                Ok(asset) => match self.store.put_binary(url, &asset.bytes, &asset.content_type) {
                    Ok(()) => cached.push(url.clone()),
                    Err(e) => warn!(kind, url = %url, error = %e, "Failed to store asset, skipping"),
                },
                Err(e) => warn!(kind, url = %url, error = %e, "Failed to fetch asset, skipping"),
            }
            self.update_progress(|progress| {
                progress.downloaded += 1;
            });
        }
        cached
    }
}

/// Distinct non-empty audio URLs across all stops, in stop order.
fn distinct_audio_urls(stops: &[TourStop]) -> Vec<String> {
    let mut seen = HashSet::new();
    stops
        .iter()
        .filter_map(|stop| stop.audio_url.as_deref())
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(url.to_string()))
        .map(str::to_string)
        .collect()
}

/// Distinct image URLs across all stops, in stop order.
fn distinct_image_urls(stops: &[TourStop]) -> Vec<String> {
    let mut seen = HashSet::new();
    stops
        .iter()
        .flat_map(|stop| stop.images.iter())
        .filter(|url| seen.insert(url.to_string()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_with(audio: Option<&str>, images: &[&str]) -> TourStop {
        TourStop {
            id: 1,
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            kids_content: None,
            order_number: 1,
            latitude: 0.0,
            longitude: 0.0,
            audio_url: audio.map(str::to_string),
            duration: None,
            next_stop_walking_time: None,
            walking_tip: None,
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_distinct_audio_urls_skips_empty_and_duplicates() {
        let stops = vec![
            stop_with(Some("/media/audio/stop1.mp3"), &[]),
            stop_with(None, &[]),
            stop_with(Some(""), &[]),
            stop_with(Some("/media/audio/stop1.mp3"), &[]),
            stop_with(Some("/media/audio/stop2.mp3"), &[]),
        ];
        assert_eq!(
            distinct_audio_urls(&stops),
            vec!["/media/audio/stop1.mp3", "/media/audio/stop2.mp3"]
        );
    }

    #[test]
    fn test_distinct_image_urls_preserves_order() {
        let stops = vec![
            stop_with(None, &["/media/images/a.jpg", "/media/images/b.jpg"]),
            stop_with(None, &["/media/images/b.jpg", "/media/images/c.jpg"]),
        ];
        assert_eq!(
            distinct_image_urls(&stops),
            vec![
                "/media/images/a.jpg",
                "/media/images/b.jpg",
                "/media/images/c.jpg"
            ]
        );
    }
}
