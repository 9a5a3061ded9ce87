//! Offline request interceptor.
//!
//! The background counterpart of the page: an independently scheduled task
//! that decides response sourcing for matching GET requests without
//! involving page code, so cached responses survive page reloads while
//! offline. It owns a private store generation, separate from the page's
//! `AssetStore`; a full reset must clear both.
//!
//! Dynamic paths (`/data/`, `/media/`) are network-first with
//! opportunistic caching and a synthetic 503 JSON body when neither
//! source can answer; everything else (markup, scripts, stylesheets) is
//! cache-first. Each request is handled self-contained, so the task can
//! be torn down and respawned between any two requests without corrupting
//! stored state.

pub mod task;

pub use task::{
    spawn, InterceptedRequest, InterceptedResponse, InterceptorHandle, PageEvent, CACHE_GENERATION,
};
