//! Headless demo that drives the adaptive controller against a simulated
//! streamed-map renderer.
//!
//! The renderer is synthetic: each frame costs time proportional to the
//! current supersampling, hires, and lowres settings plus seeded noise, so
//! the controller's corrections visibly feed back into the measured frame
//! rate. The demo advances a simulated clock by each frame's cost instead of
//! sleeping, which makes runs instant and reproducible for a given seed.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Editing the config file mid-run is picked up by the hot-reload poll
//! and flips the toggles on the next tick.
//!
//! Run with `cargo run -p vantage-demo`.
//! Run with `cargo run -p vantage-demo -- --seed 7 --duration 60` to vary.

use std::time::{Duration, Instant};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;
use vantage_app::{AdaptiveScheduler, Visibility, readiness};
use vantage_config::{CliArgs, Config};
use vantage_control::{AutoToggles, MapRenderer, ViewState};

/// Demo arguments: the shared controller flags plus simulation knobs.
#[derive(Parser, Debug)]
#[command(name = "vantage-demo", about = "Adaptive render-quality controller demo")]
struct DemoArgs {
    #[command(flatten)]
    base: CliArgs,

    /// Simulated run length in seconds.
    #[arg(long, default_value_t = 30)]
    duration: u64,

    /// Seed for the synthetic frame-cost noise.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Skip the scripted hidden/visible episode halfway through.
    #[arg(long)]
    skip_hidden_episode: bool,
}

/// Stand-in for the host map renderer: owns the tunables and charges a
/// synthetic per-frame cost that responds to them.
struct SimulatedRenderer {
    view: ViewState,
    rng: Xoshiro256StarStar,
    saves: u64,
    refreshes: u64,
}

impl SimulatedRenderer {
    fn new(seed: u64) -> Self {
        Self {
            view: ViewState::new(1.0, 250, 5_000),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            saves: 0,
            refreshes: 0,
        }
    }

    /// Synthetic frame cost: supersampling dominates quadratically, the two
    /// view radii contribute linearly, plus a little noise.
    fn frame_cost(&mut self) -> Duration {
        let ss = self.view.supersampling;
        let hires = f64::from(self.view.hires_distance);
        let lowres = f64::from(self.view.lowres_distance);

        let mut ms = 4.0 + 9.0 * ss * ss + hires / 45.0 + lowres / 1_400.0;
        ms += self.rng.gen_range(-1.5..1.5);
        Duration::from_secs_f64(ms.max(1.0) / 1000.0)
    }
}

impl MapRenderer for SimulatedRenderer {
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

fn auto_toggles(config: &Config) -> AutoToggles {
    AutoToggles {
        quality: config.auto.quality,
        hires: config.auto.hires,
        lowres: config.auto.lowres,
    }
}

fn main() {
    let args = DemoArgs::parse();

    // Resolve config directory
    let config_dir = args.base.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("vantage")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.base);

    // Initialize logging with config and debug settings
    let log_dir = config_dir.join("logs");
    vantage_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    // Bootstrap: the host renderer "appears" after a short startup delay and
    // is handed over through the one-shot readiness gate.
    let (ready, gate) = readiness();
    let seed = args.seed;
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        ready.ready(SimulatedRenderer::new(seed));
    });

    let mut host = match gate.wait() {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Host bootstrap failed: {e}");
            std::process::exit(1);
        }
    };
    info!(seed, duration = args.duration, "host renderer ready");

    // Simulated clock: starts now, advances by each frame's synthetic cost.
    let start = Instant::now();
    let end = start + Duration::from_secs(args.duration);
    let mut now = start;

    let mut scheduler = AdaptiveScheduler::new(auto_toggles(&config), now);
    scheduler.start(now);

    let hide_at = start + Duration::from_secs(args.duration / 2);
    let mut hidden_pending = !args.skip_hidden_episode && args.duration >= 4;

    let mut next_report = start + Duration::from_secs(1);
    let mut next_reload = start + Duration::from_secs(1);

    while now < end {
        if hidden_pending && now >= hide_at {
            hidden_pending = false;
            scheduler.visibility(Visibility::Hidden, now);
            info!("view hidden for 2 s, no frames delivered");
            now += Duration::from_secs(2);
            scheduler.visibility(Visibility::Visible, now);
        }

        let sampled = scheduler.frame(&mut host, now);
        now += host.frame_cost();

        if config.debug.log_samples && sampled {
            let stats = scheduler.stats();
            info!(
                fps = stats.last_fps,
                target = stats.decided_fps,
                supersampling = host.supersampling(),
                hires = host.hires_distance(),
                lowres = host.lowres_distance(),
                "sample"
            );
        }

        if now >= next_report {
            next_report += Duration::from_secs(1);
            let stats = scheduler.stats();
            info!(
                t = (now - start).as_secs(),
                fps = stats.last_fps,
                target = stats.decided_fps,
                supersampling = host.supersampling(),
                hires = host.hires_distance(),
                lowres = host.lowres_distance(),
                "status"
            );
        }

        // Pick up toggle flips made to config.ron while running.
        if now >= next_reload {
            next_reload += Duration::from_secs(1);
            if let Ok(Some(new_config)) = config.reload(&config_dir) {
                config = new_config;
                scheduler.set_toggles(auto_toggles(&config));
                info!("applied reloaded toggles");
            }
        }
    }

    let stats = scheduler.stats();
    info!(
        frames = stats.frames,
        samples = stats.samples,
        distance_commits = stats.distance_commits,
        quality_commits = stats.quality_commits,
        host_saves = host.saves,
        host_refreshes = host.refreshes,
        "simulation finished"
    );
}
