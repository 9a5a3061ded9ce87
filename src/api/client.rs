//! HTTP client for the tour server.
//!
//! A thin reqwest wrapper: JSON endpoints for the structured tour data and
//! a raw-bytes path for audio, images, and static assets. Retry policy is
//! not implemented here - the data accessor decides how many attempts a
//! read deserves based on connectivity.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, FetchedAsset, TourApi};
use crate::models::{RoutePath, TourStop};

// ============================================================================
// Constants
// ============================================================================

/// Path of the stop-list endpoint.
pub const STOPS_PATH: &str = "/data/stops";

/// Path of the route-path endpoint.
pub const ROUTES_PATH: &str = "/data/routes";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback content type when the server omits the header.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// HTTP client for the tour server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given server base URL,
    /// e.g. `https://tour.example.com`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a server-relative path against the base URL. Absolute URLs
    /// pass through unchanged so cached asset references keep working.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        debug!(url = %url, "JSON response received");
        response.json().await.map_err(ApiError::from)
    }

    async fn get_bytes(&self, path: &str) -> Result<FetchedAsset, ApiError> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        debug!(url = %url, size = bytes.len(), content_type = %content_type, "Asset received");

        Ok(FetchedAsset {
            content_type,
            bytes,
        })
    }
}

impl TourApi for ApiClient {
    fn fetch_stops(&self) -> impl Future<Output = Result<Vec<TourStop>, ApiError>> + Send {
        self.get_json(STOPS_PATH)
    }

    fn fetch_routes(&self) -> impl Future<Output = Result<Vec<RoutePath>, ApiError>> + Send {
        self.get_json(ROUTES_PATH)
    }

    fn fetch_asset(&self, url: &str) -> impl Future<Output = Result<FetchedAsset, ApiError>> + Send {
        self.get_bytes(url)
    }
}
