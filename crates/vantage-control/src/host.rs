//! Host renderer seam: capability trait plus guarded commit helpers.
//!
//! The renderer is injected once at startup and treated as an opaque
//! parameter sink. All writes funnel through the commit helpers, which skip
//! values that would not change anything so the host never sees redundant
//! reloads or persistence calls.

use tracing::debug;

use crate::distance::DistanceUpdate;
use crate::view::ViewState;

/// Capabilities the controller needs from the host map renderer.
pub trait MapRenderer {
    /// Current supersampling factor.
    fn supersampling(&self) -> f64;
    /// Current hires view distance.
    fn hires_distance(&self) -> u32;
    /// Current lowres view distance.
    fn lowres_distance(&self) -> u32;

    /// Write the supersampling factor.
    fn set_supersampling(&mut self, value: f64);
    /// Write the hires view distance.
    fn set_hires_distance(&mut self, value: u32);
    /// Write the lowres view distance.
    fn set_lowres_distance(&mut self, value: u32);

    /// Reload the streamed area affected by a view-distance change.
    fn refresh_loaded_area(&mut self);
    /// Persist the current settings. Fire-and-forget: never retried, never
    /// surfaced.
    fn save_settings(&mut self);

    /// Snapshot the current tunables.
    fn view_state(&self) -> ViewState {
        ViewState {
            supersampling: self.supersampling(),
            hires_distance: self.hires_distance(),
            lowres_distance: self.lowres_distance(),
        }
    }
}

/// Commit a batched distance update: each axis is written only if it differs,
/// and the reload notification plus persistence fire once if anything did.
///
/// Returns whether anything was written.
pub fn commit_distances<R: MapRenderer + ?Sized>(host: &mut R, update: DistanceUpdate) -> bool {
    let mut changed = false;

    if host.hires_distance() != update.hires {
        host.set_hires_distance(update.hires);
        changed = true;
    }
    if host.lowres_distance() != update.lowres {
        host.set_lowres_distance(update.lowres);
        changed = true;
    }

    if changed {
        host.refresh_loaded_area();
        host.save_settings();
        debug!(
            hires = update.hires,
            lowres = update.lowres,
            "committed view distances"
        );
    }
    changed
}

/// Commit a supersampling value, skipping the write when it already matches.
///
/// Returns whether anything was written.
pub fn commit_supersampling<R: MapRenderer + ?Sized>(host: &mut R, value: f64) -> bool {
    if host.supersampling() == value {
        return false;
    }
    host.set_supersampling(value);
    host.save_settings();
    debug!(supersampling = value, "committed supersampling");
    true
}
