//! Per-session control context threaded through every tick.

use crate::target::FpsTarget;

/// User-facing toggles gating each adjustment axis independently.
///
/// Persisted outside the core; flips are plain boolean stores consumed on the
/// next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoToggles {
    /// Allow automatic supersampling adjustment.
    pub quality: bool,
    /// Allow automatic hires view distance adjustment.
    pub hires: bool,
    /// Allow automatic lowres view distance adjustment.
    pub lowres: bool,
}

impl Default for AutoToggles {
    fn default() -> Self {
        Self {
            quality: true,
            hires: true,
            lowres: true,
        }
    }
}

/// Mutable control state for one active session: the toggles and the sticky
/// decided-fps value. One context exists per scheduler; there are no ambient
/// globals.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlContext {
    /// Per-axis enablement.
    pub toggles: AutoToggles,
    /// Decided-fps state, recomputed each sample.
    pub target: FpsTarget,
}

impl ControlContext {
    /// Create a context with the given toggles and the default decided fps.
    pub fn new(toggles: AutoToggles) -> Self {
        Self {
            toggles,
            target: FpsTarget::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_default_enabled() {
        let toggles = AutoToggles::default();
        assert!(toggles.quality && toggles.hires && toggles.lowres);
    }

    #[test]
    fn test_context_carries_toggles() {
        let ctx = ControlContext::new(AutoToggles {
            quality: false,
            hires: true,
            lowres: false,
        });
        assert!(!ctx.toggles.quality);
        assert!(ctx.toggles.hires);
        assert!(!ctx.toggles.lowres);
    }
}
