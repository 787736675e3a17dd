//! Distance controller: adapts the hires/lowres view radii to measured fps.
//!
//! Three regimes, evaluated in strict precedence per sample:
//!
//! 1. critical (`fps < LOWEST_FPS`) — snap every enabled distance to its
//!    minimum immediately;
//! 2. degraded (`LOWEST_FPS <= fps < decided`) — shrink by a step scaled with
//!    how far below the decided target the frame rate sits;
//! 3. recovering (`fps > decided`, supersampling back at full) — grow by the
//!    fixed base step.

use crate::context::ControlContext;
use crate::target::LOWEST_FPS;
use crate::view::{HIRES_MAX, HIRES_MIN, LOWRES_MAX, LOWRES_MIN, QUALITY_TARGET, ViewState};

/// Base hires view distance step per sample.
pub const DISTANCE_STEP_HIRES: u32 = 10;
/// Base lowres view distance step per sample.
pub const DISTANCE_STEP_LOWRES: u32 = 100;

/// A planned batched write of both view distances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceUpdate {
    /// New hires view distance.
    pub hires: u32,
    /// New lowres view distance.
    pub lowres: u32,
}

/// Evaluate the distance regimes against one fps sample.
///
/// Returns a batched update only when at least one enabled axis actually
/// changes; `None` means nothing to commit. Each axis honors its own toggle
/// and stays inside its documented bounds.
pub fn plan(view: &ViewState, fps: u32, ctx: &ControlContext) -> Option<DistanceUpdate> {
    let decided = ctx.target.decided();
    let mut hires = view.hires_distance;
    let mut lowres = view.lowres_distance;

    if fps < LOWEST_FPS {
        if ctx.toggles.hires && hires > HIRES_MIN {
            hires = HIRES_MIN;
        }
        if ctx.toggles.lowres && lowres > LOWRES_MIN {
            lowres = LOWRES_MIN;
        }
    } else if fps < decided {
        // 0 at the decided target, 1 at the critical floor; the divisor is
        // positive because every decided value lies above LOWEST_FPS.
        let ratio = f64::from(decided - fps) / f64::from(decided - LOWEST_FPS);
        let factor = 0.5 + ratio * 1.5;
        let hires_step = (f64::from(DISTANCE_STEP_HIRES) * factor).round() as u32;
        let lowres_step = (f64::from(DISTANCE_STEP_LOWRES) * factor).round() as u32;

        if ctx.toggles.hires {
            hires = hires.saturating_sub(hires_step).max(HIRES_MIN);
        }
        if ctx.toggles.lowres {
            lowres = lowres.saturating_sub(lowres_step).max(LOWRES_MIN);
        }
    } else if fps > decided && view.supersampling >= QUALITY_TARGET {
        if ctx.toggles.hires {
            hires = (hires + DISTANCE_STEP_HIRES).min(HIRES_MAX);
        }
        if ctx.toggles.lowres {
            lowres = (lowres + DISTANCE_STEP_LOWRES).min(LOWRES_MAX);
        }
    }

    if hires == view.hires_distance && lowres == view.lowres_distance {
        None
    } else {
        Some(DistanceUpdate { hires, lowres })
    }
}
