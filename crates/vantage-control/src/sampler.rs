//! Frame-rate measurement over fixed wall-clock windows.

use std::time::{Duration, Instant};

/// Length of one sampling window. Controllers re-evaluate once per window.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Counts rendered frames and produces one fps value per sampling window.
///
/// Callers feed every rendered frame through [`frame`](Self::frame) with the
/// frame's timestamp. Intra-window frame counts are never exposed, so
/// downstream controllers only ever observe whole-window averages.
pub struct FrameRateSampler {
    frame_count: u32,
    window_start: Instant,
}

impl FrameRateSampler {
    /// Create a sampler whose first window opens at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            frame_count: 0,
            window_start: now,
        }
    }

    /// Restart the window at `now`, discarding any partial count.
    ///
    /// Used when the loop resumes after being hidden so that elapsed-time
    /// computation never spans the hidden period.
    pub fn reset(&mut self, now: Instant) {
        self.frame_count = 0;
        self.window_start = now;
    }

    /// Record one rendered frame.
    ///
    /// Returns `Some(fps)` exactly once per elapsed [`SAMPLE_INTERVAL`],
    /// computed as `round(frames * 1000 / elapsed_ms)`, and resets the window.
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frame_count += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed < SAMPLE_INTERVAL {
            return None;
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let fps = (f64::from(self.frame_count) * 1000.0 / elapsed_ms).round() as u32;

        self.frame_count = 0;
        self.window_start = now;
        Some(fps)
    }
}
