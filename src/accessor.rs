//! Network-first read path for tour data.
//!
//! The single way the rest of the app obtains stops and routes. Live data
//! is preferred; when the network fails, the cached snapshot is silently
//! substituted and an "using offline data" flag is raised for the UI
//! banner. Retry count depends on connectivity: a request issued while the
//! app believes itself offline is attempted exactly once, since retrying
//! a dead link only makes the user wait longer.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{ApiError, TourApi};
use crate::connectivity::Connectivity;
use crate::error::OfflineError;
use crate::models::{stop, RoutePath, TourStop};
use crate::store::{keys, AssetStore};

// ============================================================================
// Constants
// ============================================================================

/// Total fetch attempts while the app believes itself online.
const ONLINE_FETCH_ATTEMPTS: u32 = 3;

/// Fixed delay between retry attempts, in milliseconds.
const RETRY_BACKOFF_MS: u64 = 500;

pub struct TourDataAccessor<A: TourApi, C: Connectivity> {
    api: A,
    store: Arc<AssetStore>,
    connectivity: C,
    offline_mode: AtomicBool,
}

impl<A: TourApi, C: Connectivity> TourDataAccessor<A, C> {
    pub fn new(api: A, store: Arc<AssetStore>, connectivity: C) -> Self {
        Self {
            api,
            store,
            connectivity,
            offline_mode: AtomicBool::new(false),
        }
    }

    /// Whether the most recent read fell back to cached data.
    pub fn is_using_offline_data(&self) -> bool {
        self.offline_mode.load(Ordering::SeqCst)
    }

    /// Read the stop list, live if possible, cached otherwise. Always
    /// returned sorted ascending by ordinal regardless of source.
    pub async fn stops(&self) -> Result<Vec<TourStop>, OfflineError> {
        let mut stops = self
            .read(keys::STOPS, "stops", || self.api.fetch_stops())
            .await?;
        stop::sort_by_ordinal(&mut stops);
        Ok(stops)
    }

    /// Read the route-path list, live if possible, cached otherwise.
    pub async fn routes(&self) -> Result<Vec<RoutePath>, OfflineError> {
        self.read(keys::ROUTES, "routes", || self.api.fetch_routes())
            .await
    }

    /// One read: bounded-retry live fetch, then cache fallback, then the
    /// original network error if the cache has nothing to offer.
    async fn read<T, F, Fut>(
        &self,
        key: &str,
        what: &str,
        fetch: F,
    ) -> Result<Vec<T>, OfflineError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let network_error = match self.fetch_with_retry(fetch).await {
            Ok(live) => {
                self.offline_mode.store(false, Ordering::SeqCst);
                return Ok(live);
            }
            Err(e) => e,
        };

        match self.store.get_value::<Vec<T>>(key) {
            Ok(Some(cached)) => {
                warn!(what, error = %network_error, "Network read failed, serving cached data");
                self.offline_mode.store(true, Ordering::SeqCst);
                Ok(cached)
            }
            Ok(None) => Err(network_error.into()),
            Err(e) => {
                // Corrupt cache entry is as good as no cache entry
                warn!(what, error = %e, "Cached value unreadable");
                Err(network_error.into())
            }
        }
    }

    async fn fetch_with_retry<T, F, Fut>(&self, fetch: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        // Connectivity is read once, at the moment the request is issued
        let attempts = if self.connectivity.is_online() {
            ONLINE_FETCH_ATTEMPTS
        } else {
            1
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts => {
                    debug!(attempt, error = %e, "Fetch failed, retrying");
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
