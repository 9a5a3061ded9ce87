//! Offline download orchestration.
//!
//! `DownloadOrchestrator::download_all` captures one complete best-effort
//! snapshot: the structured stop/route documents plus every referenced
//! audio and image asset, with progress observable through an explicit
//! listener registry.

pub mod orchestrator;

pub use orchestrator::{DownloadOrchestrator, ListenerId};
