//! Supersampling controller: opportunistic raises, floor-gated drops.
//!
//! Raising is ungated by distance state — sharpness recovers whenever the
//! frame budget allows. Lowering requires both view distances to already sit
//! at their minimums: distance reduction is the cheaper lever and must be
//! exhausted first, which keeps the two axes from oscillating against each
//! other.

use crate::context::ControlContext;
use crate::target::LOW_FPS;
use crate::view::{QUALITY_MIN, QUALITY_TARGET, ViewState};

/// Base supersampling step per sample.
pub const QUALITY_STEP: f64 = 0.1;
/// Largest single supersampling adjustment.
pub const MAX_QUALITY_STEP: f64 = 0.3;

/// Evaluate the supersampling regimes against one fps sample.
///
/// Returns the new supersampling value, rounded to two decimals, or `None`
/// when the toggle is off or no regime applies. The caller commits the value
/// through the guarded host writer, deferred to the next frame.
pub fn plan(view: &ViewState, fps: u32, ctx: &ControlContext) -> Option<f64> {
    if !ctx.toggles.quality {
        return None;
    }

    let decided = ctx.target.decided();
    let quality = view.supersampling;

    if fps > decided && quality < QUALITY_TARGET {
        let step = (QUALITY_STEP + f64::from(fps - decided) * 0.012).min(MAX_QUALITY_STEP);
        Some(round2((quality + step).min(QUALITY_TARGET)))
    } else if fps < LOW_FPS && quality > QUALITY_MIN && view.at_minimum_distances() {
        let step = (QUALITY_STEP * 2.0 + f64::from(LOW_FPS - fps) * 0.01).min(MAX_QUALITY_STEP);
        Some(round2((quality - step).max(QUALITY_MIN)))
    } else {
        None
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
