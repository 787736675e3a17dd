//! One-shot bootstrap gate for host availability.
//!
//! The surrounding bootstrap resolves the host renderer exactly once and
//! hands it through [`HostReady::ready`]; the control loop blocks on
//! [`HostGate::wait`] (or polls [`HostGate::poll`]) before activating.
//! This replaces startup polling with an explicit rendezvous, so bootstrap
//! sequencing stays out of the steady-state loop.

use crossbeam_channel::{Receiver, Sender, bounded};
use thiserror::Error;

/// The bootstrap dropped its end before the host became available.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("host readiness signal dropped before the renderer became available")]
pub struct ReadinessLost;

/// Sending half: resolved once by the bootstrap.
pub struct HostReady<T> {
    tx: Sender<T>,
}

/// Receiving half: gates scheduler activation.
pub struct HostGate<T> {
    rx: Receiver<T>,
}

/// Create a one-shot readiness channel.
pub fn readiness<T>() -> (HostReady<T>, HostGate<T>) {
    let (tx, rx) = bounded(1);
    (HostReady { tx }, HostGate { rx })
}

impl<T> HostReady<T> {
    /// Resolve the gate with the now-available host. Consumes the signal;
    /// a second resolution is impossible by construction.
    pub fn ready(self, host: T) {
        let _ = self.tx.send(host);
    }
}

impl<T> HostGate<T> {
    /// Block until the bootstrap resolves the host.
    pub fn wait(self) -> Result<T, ReadinessLost> {
        self.rx.recv().map_err(|_| ReadinessLost)
    }

    /// Non-blocking probe for callers embedded in an existing loop.
    pub fn poll(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
