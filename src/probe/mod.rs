// src/probe/mod.rs
mod stateful;

pub use stateful::{ProbeDown, StatefulProbe};

use std::sync::Arc;

/// Outcome of a single probe: `Ok(())` when healthy, any error otherwise.
/// The error content is never inspected, only its presence.
pub type ProbeResult = anyhow::Result<()>;

/// A health check that can be invoked with no arguments.
///
/// Probes may be run concurrently with each other and with themselves
/// (the same probe can sit in both sets and serve overlapping requests).
pub trait Probe: Send + Sync + 'static {
    fn check(&self) -> ProbeResult;
}

impl<F> Probe for F
where
    F: Fn() -> ProbeResult + Send + Sync + 'static,
{
    fn check(&self) -> ProbeResult {
        self()
    }
}

/// Shared handle stored in probe sets.
pub type SharedProbe = Arc<dyn Probe>;

/// Wrap any probe into a [`SharedProbe`].
pub fn shared<P: Probe>(probe: P) -> SharedProbe {
    Arc::new(probe)
}

/// Build a probe from a closure.
pub fn from_fn<F>(f: F) -> SharedProbe
where
    F: Fn() -> ProbeResult + Send + Sync + 'static,
{
    Arc::new(f)
}
