//! Connectivity signal for the read path.
//!
//! The host environment (browser `navigator.onLine` in the original,
//! platform reachability elsewhere) pushes online/offline transitions into
//! a `ConnectivityMonitor`; the accessor reads the flag at the moment each
//! request is issued. Tests inject their own `Connectivity` to simulate
//! transitions deterministically.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Read side of the connectivity signal.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared online/offline flag, updated by whatever owns the host's
/// connectivity events. Starts online.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    online: Arc<AtomicBool>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Record an online/offline transition event.
    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            info!(online, "Connectivity changed");
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Connectivity for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_starts_online() {
        assert!(ConnectivityMonitor::new().is_online());
    }

    #[test]
    fn test_transitions_are_visible_to_clones() {
        let monitor = ConnectivityMonitor::new();
        let reader = monitor.clone();
        monitor.set_online(false);
        assert!(!reader.is_online());
        monitor.set_online(true);
        assert!(reader.is_online());
    }
}
