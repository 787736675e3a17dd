//! Cooperative runtime for the adaptive quality controller: the
//! visibility-aware scheduler, the one-shot host readiness gate, and loop
//! observability counters.

pub mod readiness;
pub mod scheduler;
pub mod stats;

pub use readiness::{HostGate, HostReady, ReadinessLost, readiness};
pub use scheduler::{AdaptiveScheduler, LoopState, RESUME_SETTLE_DELAY, Visibility};
pub use stats::ControlStats;
