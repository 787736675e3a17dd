//! Adaptive render-quality control for a streamed 3D map renderer.
//!
//! Measures rendered frame rate and adjusts three coupled tunables —
//! supersampling factor, hires view distance, lowres view distance — to keep
//! frame rate inside a target band while restoring visual quality whenever
//! headroom exists. Distance reduction is the cheap lever and is exhausted
//! before supersampling is touched; distance growth waits until supersampling
//! is back at full, so the two axes never fight over the same frame budget.
//!
//! The crate is pure control logic: it never renders and never talks to a
//! windowing API. The host renderer sits behind the [`MapRenderer`] trait and
//! is treated as an opaque parameter sink.

mod context;
mod host;
mod sampler;
mod target;
mod view;

pub mod distance;
pub mod quality;

pub use context::{AutoToggles, ControlContext};
pub use distance::DistanceUpdate;
pub use host::{MapRenderer, commit_distances, commit_supersampling};
pub use sampler::{FrameRateSampler, SAMPLE_INTERVAL};
pub use target::{BEST_FPS, FpsTarget, GOOD_FPS, LOW_FPS, LOWEST_FPS, VERYGOOD_FPS};
pub use view::{
    HIRES_MAX, HIRES_MIN, LOWRES_MAX, LOWRES_MIN, QUALITY_MIN, QUALITY_TARGET, ViewState,
};
