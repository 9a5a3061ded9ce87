use serde::{Deserialize, Serialize};

/// Ephemeral download-in-flight counters exposed to the UI.
///
/// Reset to zero at the start of every `download_all` invocation and
/// discarded when the process ends; a new attempt always starts from zero.
/// `downloaded` counts every attempted item, success or failure, so a
/// progress bar always reaches `total` even when some assets fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    pub total: usize,
    pub downloaded: usize,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadProgress {
    /// Completion fraction in `[0.0, 1.0]` for rendering a progress bar.
    /// Zero while the total is still unknown.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.downloaded as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_with_zero_total() {
        assert_eq!(DownloadProgress::default().fraction(), 0.0);
    }

    #[test]
    fn test_fraction_midway() {
        let progress = DownloadProgress {
            total: 24,
            downloaded: 6,
            completed: false,
            error: None,
        };
        assert_eq!(progress.fraction(), 0.25);
    }

    #[test]
    fn test_error_field_omitted_when_absent() {
        let progress = DownloadProgress {
            total: 2,
            downloaded: 2,
            completed: true,
            error: None,
        };
        let json = serde_json::to_string(&progress).expect("serialize progress");
        assert!(!json.contains("error"));
    }
}
