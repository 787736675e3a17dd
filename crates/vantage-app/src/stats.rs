//! Loop observability counters.

/// Counters shared with logging and the demo readout.
/// Updated by the scheduler every tick; purely informational.
#[derive(Clone, Copy, Debug, Default, serde::Serialize)]
pub struct ControlStats {
    /// Frames observed while the loop was running.
    pub frames: u64,
    /// Completed sampling windows.
    pub samples: u64,
    /// Most recent measured fps.
    pub last_fps: u32,
    /// Most recent decided target fps.
    pub decided_fps: u32,
    /// Batched distance writes that reached the host.
    pub distance_commits: u64,
    /// Supersampling writes that reached the host.
    pub quality_commits: u64,
}

impl ControlStats {
    pub(crate) fn record_sample(&mut self, fps: u32, decided: u32) {
        self.samples += 1;
        self.last_fps = fps;
        self.decided_fps = decided;
    }
}
