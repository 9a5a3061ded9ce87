//! HTTP client module for the tour server.
//!
//! This module provides the `ApiClient` for fetching tour stops, route
//! paths, and binary media assets, plus the `TourApi` trait that the
//! download orchestrator, data accessor, and request interceptor are
//! generic over so tests can script the network deterministically.

pub mod client;
pub mod error;

use std::future::Future;

pub use client::ApiClient;
pub use error::ApiError;

use crate::models::{RoutePath, TourStop};

/// A binary asset fetched from the server, with the content type the
/// server declared for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedAsset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Network seam for everything the offline subsystem fetches.
///
/// `ApiClient` is the production implementation; tests provide scripted
/// implementations that fail selected URLs or simulate a dead network.
pub trait TourApi: Send + Sync {
    /// Fetch the full stop list from `GET /data/stops`.
    fn fetch_stops(&self) -> impl Future<Output = Result<Vec<TourStop>, ApiError>> + Send;

    /// Fetch the full route-path list from `GET /data/routes`.
    fn fetch_routes(&self) -> impl Future<Output = Result<Vec<RoutePath>, ApiError>> + Send;

    /// Fetch a binary asset (audio, image, or static file) by URL or
    /// server-relative path.
    fn fetch_asset(&self, url: &str) -> impl Future<Output = Result<FetchedAsset, ApiError>> + Send;
}

/// One client can be shared by the orchestrator, accessor, and
/// interceptor without cloning connection pools.
impl<T: TourApi> TourApi for std::sync::Arc<T> {
    fn fetch_stops(&self) -> impl Future<Output = Result<Vec<TourStop>, ApiError>> + Send {
        T::fetch_stops(self)
    }

    fn fetch_routes(&self) -> impl Future<Output = Result<Vec<RoutePath>, ApiError>> + Send {
        T::fetch_routes(self)
    }

    fn fetch_asset(&self, url: &str) -> impl Future<Output = Result<FetchedAsset, ApiError>> + Send {
        T::fetch_asset(self, url)
    }
}
