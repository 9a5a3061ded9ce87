//! Shared test fixtures: a scripted `TourApi` and tour data builders.

// Each integration test binary compiles this module separately and uses
// a different subset of it.
#![allow(dead_code)]

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tourcache::api::{ApiError, FetchedAsset, TourApi};
use tourcache::models::{RoutePath, TourStop};

/// Route crate logs to the test harness; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scripted network: serves fixed tour data and synthetic asset bytes,
/// with per-URL failure injection, a whole-network kill switch, an
/// optional artificial delay, and request counters.
#[derive(Default)]
pub struct MockApi {
    stops: Mutex<Vec<TourStop>>,
    routes: Mutex<Vec<RoutePath>>,
    network_down: AtomicBool,
    failing_urls: Mutex<HashSet<String>>,
    delay: Mutex<Option<Duration>>,
    pub stops_calls: AtomicUsize,
    pub routes_calls: AtomicUsize,
    pub asset_calls: AtomicUsize,
}

impl MockApi {
    pub fn new(stops: Vec<TourStop>, routes: Vec<RoutePath>) -> Self {
        Self {
            stops: Mutex::new(stops),
            routes: Mutex::new(routes),
            ..Self::default()
        }
    }

    pub fn set_network_down(&self, down: bool) {
        self.network_down.store(down, Ordering::SeqCst);
    }

    /// Make fetches of this one URL fail while the rest of the network
    /// stays up.
    pub fn fail_url(&self, url: &str) {
        self.failing_urls.lock().unwrap().insert(url.to_string());
    }

    /// Delay every response, to hold a download in flight.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn clear_delay(&self) {
        *self.delay.lock().unwrap() = None;
    }

    pub fn stops_call_count(&self) -> usize {
        self.stops_calls.load(Ordering::SeqCst)
    }

    fn check_network(&self) -> Result<(), ApiError> {
        if self.network_down.load(Ordering::SeqCst) {
            Err(ApiError::Unreachable("simulated network outage".to_string()))
        } else {
            Ok(())
        }
    }

    fn current_delay(&self) -> Option<Duration> {
        *self.delay.lock().unwrap()
    }
}

async fn respond<T>(delay: Option<Duration>, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    result
}

impl TourApi for MockApi {
    fn fetch_stops(&self) -> impl Future<Output = Result<Vec<TourStop>, ApiError>> + Send {
        self.stops_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .check_network()
            .map(|()| self.stops.lock().unwrap().clone());
        respond(self.current_delay(), result)
    }

    fn fetch_routes(&self) -> impl Future<Output = Result<Vec<RoutePath>, ApiError>> + Send {
        self.routes_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .check_network()
            .map(|()| self.routes.lock().unwrap().clone());
        respond(self.current_delay(), result)
    }

    fn fetch_asset(&self, url: &str) -> impl Future<Output = Result<FetchedAsset, ApiError>> + Send {
        self.asset_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_network().and_then(|()| {
            if self.failing_urls.lock().unwrap().contains(url) {
                Err(ApiError::NotFound(url.to_string()))
            } else {
                Ok(FetchedAsset {
                    content_type: content_type_for(url),
                    bytes: format!("bytes:{}", url).into_bytes(),
                })
            }
        });
        respond(self.current_delay(), result)
    }
}

fn content_type_for(url: &str) -> String {
    if url.ends_with(".mp3") {
        "audio/mpeg"
    } else if url.ends_with(".jpg") {
        "image/jpeg"
    } else if url.ends_with(".html") {
        "text/html"
    } else if url.ends_with(".js") {
        "text/javascript"
    } else {
        "application/octet-stream"
    }
    .to_string()
}

pub fn make_stop(id: i64, order_number: i32, image_count: usize) -> TourStop {
    TourStop {
        id,
        title: format!("Stop {}", id),
        subtitle: format!("Subtitle {}", id),
        description: format!("Description of stop {}", id),
        kids_content: None,
        order_number,
        latitude: 52.37 + id as f64 * 0.001,
        longitude: 4.91 - id as f64 * 0.001,
        audio_url: Some(format!("/media/audio/stop{}.mp3", id)),
        duration: Some("10 minutes".to_string()),
        next_stop_walking_time: None,
        walking_tip: None,
        images: (0..image_count)
            .map(|image| format!("/media/images/stop{}_{}.jpg", id, image))
            .collect(),
    }
}

/// Eight stops with 8 audio URLs and 14 image URLs total: stops 1-6 carry
/// two images each, stops 7-8 one each.
pub fn eight_stop_tour() -> Vec<TourStop> {
    (1..=8)
        .map(|id| make_stop(id, id as i32, if id <= 6 { 2 } else { 1 }))
        .collect()
}
