//! Domain types for the walking tour.
//!
//! `TourStop` and `RoutePath` mirror the server's JSON exactly (camelCase
//! field names on the wire). `DownloadProgress` is process-local state
//! reported to the UI while an offline download runs; it is never
//! persisted.

pub mod progress;
pub mod route;
pub mod stop;

pub use progress::DownloadProgress;
pub use route::{GeoPoint, RoutePath};
pub use stop::TourStop;
