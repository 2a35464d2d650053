//! Wall-clock timing of listing steps.

use std::time::Instant;

/// Tracing target for timing events, enabled by the timing toggle.
pub const TIMING_TARGET: &str = "memo::timing";

/// Reports the time between creation and drop as a `memo::timing` event.
#[must_use = "the timer reports when dropped"]
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: TIMING_TARGET, "{}: {:.1}ms", self.label, ms);
    }
}
