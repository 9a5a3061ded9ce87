use std::path::Path;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::TourApi;
use crate::error::OfflineError;
use crate::store::AssetStore;

// ============================================================================
// Constants
// ============================================================================

/// Current store generation. Bumped on releases whose cached assets are
/// incompatible; older generations are deleted on activation.
pub const CACHE_GENERATION: &str = "tour-cache-v1";

/// Prefix shared by all generation directories.
const GENERATION_PREFIX: &str = "tour-cache-";

/// Path prefixes treated as dynamic data (network-first).
const DATA_PREFIX: &str = "/data/";
const MEDIA_PREFIX: &str = "/media/";
const MEDIA_AUDIO_PREFIX: &str = "/media/audio/";
const MEDIA_IMAGE_PREFIX: &str = "/media/images/";

/// Command channel depth between pages and the interceptor task.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Depth of each connected page's event channel.
const PAGE_EVENT_BUFFER_SIZE: usize = 8;

/// A request the interceptor has been asked to source.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub method: String,
    pub path: String,
}

impl InterceptedRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
        }
    }
}

/// The response the interceptor produced, from network or cache.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl InterceptedResponse {
    fn ok(content_type: String, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    fn offline_json(message: &str) -> Self {
        Self {
            status: 503,
            content_type: "application/json".to_string(),
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    fn offline_text() -> Self {
        Self {
            status: 503,
            content_type: "text/plain".to_string(),
            body: b"Offline - Resource not available".to_vec(),
        }
    }
}

/// Event broadcast from the interceptor to every connected page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The interceptor's private store has been wiped.
    CacheCleared,
}

enum Command {
    Handle {
        request: InterceptedRequest,
        reply: oneshot::Sender<InterceptedResponse>,
    },
    /// Wipe the interceptor-owned store; acknowledged with
    /// `PageEvent::CacheCleared` to all connected pages.
    ClearStore,
    Connect {
        events: mpsc::Sender<PageEvent>,
    },
}

/// Page-side handle to the interceptor task. Cloneable; every clone talks
/// to the same task.
#[derive(Clone)]
pub struct InterceptorHandle {
    tx: mpsc::Sender<Command>,
}

impl InterceptorHandle {
    /// Ask the interceptor to source a request.
    pub async fn handle(
        &self,
        request: InterceptedRequest,
    ) -> Result<InterceptedResponse, OfflineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Handle {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| OfflineError::InterceptorStopped)?;
        reply_rx.await.map_err(|_| OfflineError::InterceptorStopped)
    }

    /// Register this page for interceptor events.
    pub async fn connect(&self) -> Result<mpsc::Receiver<PageEvent>, OfflineError> {
        let (events_tx, events_rx) = mpsc::channel(PAGE_EVENT_BUFFER_SIZE);
        self.tx
            .send(Command::Connect { events: events_tx })
            .await
            .map_err(|_| OfflineError::InterceptorStopped)?;
        Ok(events_rx)
    }

    /// Request a wipe of the interceptor's private store. Completion is
    /// acknowledged as `PageEvent::CacheCleared` on every connected page's
    /// event channel.
    pub async fn clear_store(&self) -> Result<(), OfflineError> {
        self.tx
            .send(Command::ClearStore)
            .await
            .map_err(|_| OfflineError::InterceptorStopped)
    }
}

/// Activate the interceptor: delete stale store generations under
/// `store_root`, open the current generation, and spawn the task.
pub fn spawn<A: TourApi + 'static>(
    api: A,
    store_root: impl AsRef<Path>,
) -> Result<InterceptorHandle, OfflineError> {
    let store_root = store_root.as_ref();
    std::fs::create_dir_all(store_root)?;
    delete_stale_generations(store_root);

    let store = AssetStore::new(store_root.join(CACHE_GENERATION))?;
    let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    tokio::spawn(run(api, store, rx));
    info!(generation = CACHE_GENERATION, "Offline interceptor activated");
    Ok(InterceptorHandle { tx })
}

/// Remove every generation directory other than the current one.
/// Best-effort: a stale directory that cannot be removed is logged, not
/// fatal.
fn delete_stale_generations(store_root: &Path) {
    let entries = match std::fs::read_dir(store_root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Could not scan interceptor store root");
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(GENERATION_PREFIX) && name != CACHE_GENERATION {
            info!(generation = name, "Deleting stale cache generation");
            if let Err(e) = std::fs::remove_dir_all(entry.path()) {
                warn!(generation = name, error = %e, "Failed to delete stale generation");
            }
        }
    }
}

async fn run<A: TourApi>(api: A, store: AssetStore, mut rx: mpsc::Receiver<Command>) {
    let mut pages: Vec<mpsc::Sender<PageEvent>> = Vec::new();

    while let Some(command) = rx.recv().await {
        match command {
            Command::Handle { request, reply } => {
                let response = handle_request(&api, &store, &request).await;
                // Page may have navigated away while we worked
                let _ = reply.send(response);
            }
            Command::ClearStore => match store.delete_all() {
                Ok(()) => {
                    info!("Interceptor store cleared");
                    let mut alive = Vec::with_capacity(pages.len());
                    for page in pages {
                        if page.send(PageEvent::CacheCleared).await.is_ok() {
                            alive.push(page);
                        }
                    }
                    pages = alive;
                }
                Err(e) => warn!(error = %e, "Failed to clear interceptor store"),
            },
            Command::Connect { events } => pages.push(events),
        }
    }
}

async fn handle_request<A: TourApi>(
    api: &A,
    store: &AssetStore,
    request: &InterceptedRequest,
) -> InterceptedResponse {
    // Non-GET requests are never cached, only passed through
    if request.method != "GET" {
        return match api.fetch_asset(&request.path).await {
            Ok(asset) => InterceptedResponse::ok(asset.content_type, asset.bytes),
            Err(_) => InterceptedResponse::offline_text(),
        };
    }

    if is_dynamic_path(&request.path) {
        network_first(api, store, &request.path).await
    } else {
        cache_first(api, store, &request.path).await
    }
}

fn is_dynamic_path(path: &str) -> bool {
    path.starts_with(DATA_PREFIX) || path.starts_with(MEDIA_PREFIX)
}

/// Network-first: live response wins and is opportunistically cached;
/// cache answers when the network cannot; otherwise a synthetic 503 that
/// tells the UI precisely what is missing.
async fn network_first<A: TourApi>(
    api: &A,
    store: &AssetStore,
    path: &str,
) -> InterceptedResponse {
    match api.fetch_asset(path).await {
        Ok(asset) => {
            if let Err(e) = store.put_binary(path, &asset.bytes, &asset.content_type) {
                warn!(path, error = %e, "Failed to cache response");
            }
            InterceptedResponse::ok(asset.content_type, asset.bytes)
        }
        Err(network_error) => {
            debug!(path, error = %network_error, "Network failed, trying interceptor cache");
            match store.get_binary(path) {
                Ok(Some(stored)) => InterceptedResponse::ok(stored.content_type, stored.bytes),
                _ => offline_data_response(path),
            }
        }
    }
}

/// Cache-first: stored copy served immediately; otherwise fetched live
/// and stored for next time; plain-text 503 when both fail.
async fn cache_first<A: TourApi>(api: &A, store: &AssetStore, path: &str) -> InterceptedResponse {
    match store.get_binary(path) {
        Ok(Some(stored)) => {
            return InterceptedResponse::ok(stored.content_type, stored.bytes);
        }
        Err(e) => warn!(path, error = %e, "Interceptor cache read failed"),
        Ok(None) => {}
    }

    match api.fetch_asset(path).await {
        Ok(asset) => {
            if let Err(e) = store.put_binary(path, &asset.bytes, &asset.content_type) {
                warn!(path, error = %e, "Failed to cache static asset");
            }
            InterceptedResponse::ok(asset.content_type, asset.bytes)
        }
        Err(e) => {
            warn!(path, error = %e, "Static asset unavailable offline");
            InterceptedResponse::offline_text()
        }
    }
}

fn offline_data_response(path: &str) -> InterceptedResponse {
    if path.starts_with(MEDIA_AUDIO_PREFIX) {
        InterceptedResponse::offline_json("Audio file not available offline")
    } else if path.starts_with(MEDIA_IMAGE_PREFIX) {
        InterceptedResponse::offline_json("Image not available offline")
    } else {
        InterceptedResponse::offline_json("Cannot connect to server, and no offline data available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_path_classification() {
        assert!(is_dynamic_path("/data/stops"));
        assert!(is_dynamic_path("/media/audio/stop1.mp3"));
        assert!(is_dynamic_path("/media/images/nemo1.jpg"));
        assert!(!is_dynamic_path("/index.html"));
        assert!(!is_dynamic_path("/assets/app.js"));
        assert!(!is_dynamic_path("/"));
    }

    #[test]
    fn test_offline_data_response_distinguishes_kinds() {
        let audio = offline_data_response("/media/audio/stop3.mp3");
        assert_eq!(audio.status, 503);
        assert!(String::from_utf8_lossy(&audio.body).contains("Audio"));

        let image = offline_data_response("/media/images/nemo1.jpg");
        assert!(String::from_utf8_lossy(&image.body).contains("Image"));

        let generic = offline_data_response("/data/stops");
        assert!(String::from_utf8_lossy(&generic.body).contains("no offline data"));
    }
}
