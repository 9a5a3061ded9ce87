use serde::{Deserialize, Serialize};

/// A single point of interest in the tour.
///
/// `order_number` is a 1-based ordinal that defines traversal order; it is
/// unique across the stop set. Callers must never rely on arrival order of
/// a stop collection - the accessor sorts by ordinal on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStop {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub kids_content: Option<String>,
    pub order_number: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub audio_url: Option<String>,
    /// Expected time to spend at this stop, e.g. "10 minutes".
    pub duration: Option<String>,
    pub next_stop_walking_time: Option<String>,
    pub walking_tip: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Sort stops ascending by ordinal. Applied on every read regardless of
/// whether the data came from the network or the cache.
pub fn sort_by_ordinal(stops: &mut [TourStop]) {
    stops.sort_by_key(|stop| stop.order_number);
}
