//! Visibility-aware cooperative control loop.
//!
//! The host calls [`AdaptiveScheduler::frame`] once per rendered frame. Most
//! frames only bump the sampler; once per sampling window the full
//! sample-and-decide pass runs: measure fps, recompute the decided target,
//! evaluate the distance controller, then the quality controller against the
//! tick's final distance values. Everything runs synchronously inside the
//! frame callback, so the two controllers never observe each other's
//! half-applied state.
//!
//! Quality commits are decoupled from the deciding tick: the planned value is
//! held and written at the start of the next frame callback.

use std::time::{Duration, Instant};

use tracing::{debug, info};
use vantage_control::{
    AutoToggles, ControlContext, FrameRateSampler, MapRenderer, commit_distances,
    commit_supersampling, distance, quality,
};

use crate::stats::ControlStats;

/// Delay between the view becoming visible again and the loop restarting.
/// Lets the host settle before frame cadence is trusted again.
pub const RESUME_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Abstract visibility signal, independent of any particular host event API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// The view is on screen; frames are being rendered.
    Visible,
    /// The view is hidden; the host stops delivering frame callbacks.
    Hidden,
}

/// Scheduler lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Not ticking. Frame callbacks are ignored.
    Idle,
    /// Ticking once per rendered frame.
    Running,
}

/// The cooperative loop driving sampler, decided target, and both
/// controllers. One instance per session; owns the [`ControlContext`].
pub struct AdaptiveScheduler {
    state: LoopState,
    resume_at: Option<Instant>,
    sampler: FrameRateSampler,
    context: ControlContext,
    pending_supersampling: Option<f64>,
    stats: ControlStats,
}

impl AdaptiveScheduler {
    /// Create an idle scheduler with the given toggles.
    pub fn new(toggles: AutoToggles, now: Instant) -> Self {
        Self {
            state: LoopState::Idle,
            resume_at: None,
            sampler: FrameRateSampler::new(now),
            context: ControlContext::new(toggles),
            pending_supersampling: None,
            stats: ControlStats::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Loop counters for logging and diagnostics.
    pub fn stats(&self) -> &ControlStats {
        &self.stats
    }

    /// Current toggles.
    pub fn toggles(&self) -> AutoToggles {
        self.context.toggles
    }

    /// Replace the toggles; consumed from the next tick on.
    pub fn set_toggles(&mut self, toggles: AutoToggles) {
        self.context.toggles = toggles;
    }

    /// Initial activation once the host is ready and visible.
    /// No-op when already running.
    pub fn start(&mut self, now: Instant) {
        if self.state == LoopState::Running {
            return;
        }
        self.enter_running(now);
        info!("adaptive quality control started");
    }

    /// Feed an abstract visibility change into the state machine.
    ///
    /// Hidden cancels the loop synchronously. Visible schedules a resume
    /// after [`RESUME_SETTLE_DELAY`]; while already running it is a no-op,
    /// so only one logical loop ever exists.
    pub fn visibility(&mut self, visibility: Visibility, now: Instant) {
        match visibility {
            Visibility::Hidden => {
                if self.state == LoopState::Running {
                    info!("paused: view hidden");
                }
                self.state = LoopState::Idle;
                self.resume_at = None;
            }
            Visibility::Visible => {
                if self.state == LoopState::Running {
                    return;
                }
                if self.resume_at.is_none() {
                    self.resume_at = Some(now + RESUME_SETTLE_DELAY);
                }
            }
        }
    }

    /// Per-frame callback from the host.
    ///
    /// Ignored while idle, except that a pending resume whose settle delay
    /// has passed restarts the loop with counters reset — elapsed-time
    /// computation never spans a hidden period. Returns `true` when a full
    /// sample-and-decide pass ran.
    pub fn frame<R: MapRenderer + ?Sized>(&mut self, host: &mut R, now: Instant) -> bool {
        match self.state {
            LoopState::Idle => match self.resume_at {
                Some(at) if now >= at => {
                    self.enter_running(now);
                    info!("resumed: view visible");
                }
                _ => return false,
            },
            LoopState::Running => {}
        }

        // Apply the previous tick's quality decision before anything else.
        if let Some(value) = self.pending_supersampling.take()
            && commit_supersampling(host, value)
        {
            self.stats.quality_commits += 1;
        }

        self.stats.frames += 1;
        let Some(fps) = self.sampler.frame(now) else {
            return false;
        };
        self.sample_pass(host, fps);
        true
    }

    fn enter_running(&mut self, now: Instant) {
        self.sampler.reset(now);
        self.resume_at = None;
        self.state = LoopState::Running;
    }

    /// One sample-and-decide pass, in fixed order: decided target, distance
    /// controller, quality controller.
    fn sample_pass<R: MapRenderer + ?Sized>(&mut self, host: &mut R, fps: u32) {
        let decided = self.context.target.update(host.hires_distance());
        self.stats.record_sample(fps, decided);
        debug!(fps, decided, "sample window closed");

        let view = host.view_state();
        if let Some(update) = distance::plan(&view, fps, &self.context)
            && commit_distances(host, update)
        {
            self.stats.distance_commits += 1;
        }

        // Quality reads the tick's final distance values.
        let view = host.view_state();
        if let Some(value) = quality::plan(&view, fps, &self.context) {
            self.pending_supersampling = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_control::{HIRES_MIN, LOWRES_MIN, SAMPLE_INTERVAL, ViewState};

    struct TestRenderer {
        view: ViewState,
        saves: u32,
        refreshes: u32,
    }

    impl TestRenderer {
        fn new(supersampling: f64, hires: u32, lowres: u32) -> Self {
            Self {
                view: ViewState::new(supersampling, hires, lowres),
                saves: 0,
                refreshes: 0,
            }
        }
    }

    impl MapRenderer for TestRenderer {
        fn supersampling(&self) -> f64 {
            self.view.supersampling
        }
        fn hires_distance(&self) -> u32 {
            self.view.hires_distance
        }
        fn lowres_distance(&self) -> u32 {
            self.view.lowres_distance
        }
        fn set_supersampling(&mut self, value: f64) {
            self.view.supersampling = value;
        }
        fn set_hires_distance(&mut self, value: u32) {
            self.view.hires_distance = value;
        }
        fn set_lowres_distance(&mut self, value: u32) {
            self.view.lowres_distance = value;
        }
        fn refresh_loaded_area(&mut self) {
            self.refreshes += 1;
        }
        fn save_settings(&mut self) {
            self.saves += 1;
        }
    }

    /// Drive one full sampling window at `frames` frames per window
    /// (measured fps = frames * 4). Returns the timestamp of the last frame.
    fn drive_window(
        scheduler: &mut AdaptiveScheduler,
        host: &mut TestRenderer,
        start: Instant,
        frames: u32,
    ) -> Instant {
        let spacing = SAMPLE_INTERVAL.as_secs_f64() / f64::from(frames);
        for i in 1..frames {
            scheduler.frame(host, start + Duration::from_secs_f64(spacing * f64::from(i)));
        }
        let last = start + SAMPLE_INTERVAL;
        scheduler.frame(host, last);
        last
    }

    fn running_scheduler(now: Instant) -> AdaptiveScheduler {
        let mut scheduler = AdaptiveScheduler::new(AutoToggles::default(), now);
        scheduler.start(now);
        scheduler
    }

    /// Frames while idle are ignored entirely.
    #[test]
    fn test_idle_ignores_frames() {
        let now = Instant::now();
        let mut scheduler = AdaptiveScheduler::new(AutoToggles::default(), now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        for i in 1..=40 {
            assert!(!scheduler.frame(&mut host, now + Duration::from_millis(i * 16)));
        }
        assert_eq!(scheduler.state(), LoopState::Idle);
        assert_eq!(scheduler.stats().frames, 0);
        assert_eq!(host.saves, 0);
    }

    /// A degraded window shrinks distances with ratio-scaled steps.
    #[test]
    fn test_degraded_window_commits_distances() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        // 11 frames per window = 44 fps; hires 150 decides a target of 50.
        drive_window(&mut scheduler, &mut host, now, 11);

        assert_eq!(scheduler.stats().last_fps, 44);
        assert_eq!(scheduler.stats().decided_fps, 50);
        // ratio 0.2 -> factor 0.8 -> steps 8 / 80
        assert_eq!(host.view.hires_distance, 142);
        assert_eq!(host.view.lowres_distance, 4_920);
        assert_eq!(scheduler.stats().distance_commits, 1);
        assert_eq!(host.refreshes, 1);
        assert_eq!(host.saves, 1);
    }

    /// A quality raise is decided in the sampling tick but written on the
    /// following frame.
    #[test]
    fn test_quality_commit_is_deferred() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(0.7, 150, 5_000);

        // 15 frames per window = 60 fps against a decided 50.
        let last = drive_window(&mut scheduler, &mut host, now, 15);

        // Decision made, nothing written yet.
        assert_eq!(host.view.supersampling, 0.7);
        assert_eq!(host.saves, 0);

        // The very next frame applies it.
        scheduler.frame(&mut host, last + Duration::from_millis(16));
        assert!((host.view.supersampling - 0.92).abs() < 1e-9);
        assert_eq!(host.saves, 1);
        assert_eq!(scheduler.stats().quality_commits, 1);
    }

    /// The quality controller sees the distances the distance controller
    /// just committed within the same tick.
    #[test]
    fn test_quality_reads_post_distance_state() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        // One degraded hires step away from the floor; lowres already there.
        let mut host = TestRenderer::new(0.8, 68, LOWRES_MIN);

        // 8 frames per window = 32 fps; hires 68 decides a target of 40.
        let last = drive_window(&mut scheduler, &mut host, now, 8);
        // ratio (40-32)/20 = 0.4 -> factor 1.1 -> step 11: hires hits the floor.
        assert_eq!(host.view.hires_distance, HIRES_MIN);

        // The lower-quality gate passed in the same tick: a drop is pending.
        scheduler.frame(&mut host, last + Duration::from_millis(16));
        assert!(host.view.supersampling < 0.8);
    }

    /// Hidden cancels synchronously; no background ticking.
    #[test]
    fn test_hidden_cancels_loop() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        scheduler.visibility(Visibility::Hidden, now);
        assert_eq!(scheduler.state(), LoopState::Idle);

        for i in 1..=40 {
            assert!(!scheduler.frame(&mut host, now + Duration::from_millis(i * 16)));
        }
        assert_eq!(scheduler.stats().frames, 0);
    }

    /// Resume waits out the settle delay, then restarts with a fresh window
    /// so no sample spans the hidden period.
    #[test]
    fn test_resume_after_settle_delay() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        scheduler.frame(&mut host, now + Duration::from_millis(16));
        scheduler.visibility(Visibility::Hidden, now + Duration::from_millis(32));

        // Hidden for five seconds, then visible again.
        let visible_at = now + Duration::from_secs(5);
        scheduler.visibility(Visibility::Visible, visible_at);
        assert_eq!(scheduler.state(), LoopState::Idle);

        // Frames inside the settle delay are still ignored.
        assert!(!scheduler.frame(&mut host, visible_at + Duration::from_millis(50)));
        assert_eq!(scheduler.state(), LoopState::Idle);

        // First frame past the deadline restarts the loop.
        let resumed = visible_at + RESUME_SETTLE_DELAY;
        scheduler.frame(&mut host, resumed);
        assert_eq!(scheduler.state(), LoopState::Running);

        // The next window closes 250 ms after the resume point, not 5+ s
        // after the pre-hide window opened: 15 frames (the resume frame plus
        // 14 more) over 250 ms read as 60 fps, unpolluted by the hidden gap.
        drive_window(&mut scheduler, &mut host, resumed, 14);
        assert_eq!(scheduler.stats().last_fps, 60);
    }

    /// Entering Running while already Running is a no-op.
    #[test]
    fn test_reentrancy_guard() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        // Mid-window, a redundant visible signal and start() must not reset
        // the sampler.
        for i in 1..=5 {
            scheduler.frame(&mut host, now + Duration::from_millis(i * 10));
        }
        scheduler.visibility(Visibility::Visible, now + Duration::from_millis(60));
        scheduler.start(now + Duration::from_millis(70));

        // The window still closes on schedule with all six frames counted.
        // Had either signal reset the sampler, this frame would land mid
        // window and no sample would close at all.
        scheduler.frame(&mut host, now + SAMPLE_INTERVAL);
        assert_eq!(scheduler.stats().samples, 1);
        assert_eq!(scheduler.stats().last_fps, 24);
    }

    /// Toggle flips take effect on the next tick without restarting.
    #[test]
    fn test_toggle_flip_consumed_next_tick() {
        let now = Instant::now();
        let mut scheduler = running_scheduler(now);
        let mut host = TestRenderer::new(1.0, 150, 5_000);

        let last = drive_window(&mut scheduler, &mut host, now, 11); // 44 fps
        assert_eq!(host.view.hires_distance, 142);

        scheduler.set_toggles(AutoToggles {
            quality: true,
            hires: false,
            lowres: true,
        });
        drive_window(&mut scheduler, &mut host, last, 11);
        assert_eq!(host.view.hires_distance, 142); // frozen
        assert!(host.view.lowres_distance < 4_920); // still adapting
    }
}
