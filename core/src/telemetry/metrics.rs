use serde::Serialize;
use std::sync::Mutex;

/// Counters gathered while solving frequency bins; shared across worker threads.
pub struct SolveMetrics {
    inner: Mutex<MetricsSnapshot>,
}

/// Point-in-time copy of the solve counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub bins_solved: usize,
    pub irls_iterations: usize,
    pub unconverged_bins: usize,
    pub failed_bins: usize,
}

impl SolveMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_bin(&self, iterations: usize, converged: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.bins_solved += 1;
            metrics.irls_iterations += iterations;
            if !converged {
                metrics.unconverged_bins += 1;
            }
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed_bins += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }

    /// Overwrites the counters with a finished snapshot.
    pub fn store(&self, snapshot: MetricsSnapshot) {
        if let Ok(mut metrics) = self.inner.lock() {
            *metrics = snapshot;
        }
    }
}

impl Default for SolveMetrics {
    fn default() -> Self {
        Self::new()
    }
}
