// src/probe/stateful.rs
use super::{Probe, ProbeResult, SharedProbe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("probe is marked as down")]
pub struct ProbeDown;

/// A probe that is either "up" (healthy) or "down" (unhealthy), toggled by
/// the owning application. Starts out down.
///
/// Clones share the same state, so one clone can be handed to the
/// configuration while another is kept around to flip it.
#[derive(Debug, Clone, Default)]
pub struct StatefulProbe {
    up: Arc<AtomicBool>,
}

impl StatefulProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_as_up(&self) {
        self.up.store(true, Ordering::SeqCst);
    }

    pub fn mark_as_down(&self) {
        self.up.store(false, Ordering::SeqCst);
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::SeqCst)
    }

    /// Probe handle backed by this cell.
    pub fn probe(&self) -> SharedProbe {
        Arc::new(self.clone())
    }
}

impl Probe for StatefulProbe {
    fn check(&self) -> ProbeResult {
        if self.is_up() {
            Ok(())
        } else {
            Err(ProbeDown.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_down() {
        let sp = StatefulProbe::new();
        assert!(!sp.is_up());
        assert!(sp.check().is_err());
    }

    #[test]
    fn mark_as_up_then_down() {
        let sp = StatefulProbe::new();
        let probe = sp.probe();

        sp.mark_as_up();
        assert!(probe.check().is_ok());

        sp.mark_as_down();
        let err = probe.check().unwrap_err();
        assert!(err.downcast_ref::<ProbeDown>().is_some());
    }

    #[test]
    fn clones_share_state() {
        let sp = StatefulProbe::new();
        let other = sp.clone();
        other.mark_as_up();
        assert!(sp.is_up());
    }
}
