//! tourcache - offline content cache for a walking-tour client.
//!
//! A walking tour is a sequence of geo-located stops with narrated audio
//! and photos, used by people walking through a city with patchy data
//! coverage. This crate implements the part that keeps the tour usable
//! when the network drops: a persistent asset store, a best-effort
//! offline download with observable progress, a network-first read path
//! that silently substitutes cached data, and a background request
//! interceptor that serves cached responses independently of the page.

pub mod accessor;
pub mod api;
pub mod connectivity;
pub mod download;
pub mod error;
pub mod interceptor;
pub mod models;
pub mod seed;
pub mod status;
pub mod store;

pub use accessor::TourDataAccessor;
pub use api::{ApiClient, ApiError, FetchedAsset, TourApi};
pub use connectivity::{Connectivity, ConnectivityMonitor};
pub use download::{DownloadOrchestrator, ListenerId};
pub use error::OfflineError;
pub use interceptor::{InterceptedRequest, InterceptedResponse, InterceptorHandle, PageEvent};
pub use models::{DownloadProgress, GeoPoint, RoutePath, TourStop};
pub use status::CacheStatus;
pub use store::AssetStore;
