// src/query/status_query.rs
use super::Verdict;
use crate::probe::SharedProbe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, warn};

/// One aggregation over a probe set.
///
/// Every probe runs on its own blocking-pool thread. A collector task joins
/// all of them and then publishes the final verdict exactly once, so any
/// reader that sees a verdict sees every probe's contribution.
#[derive(Debug, Clone)]
pub struct StatusQuery {
    probe_count: usize,
    result: watch::Receiver<Option<bool>>,
}

impl StatusQuery {
    /// Launch every probe immediately and return without waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(probes: &[SharedProbe]) -> Self {
        if probes.is_empty() {
            let (_tx, result) = watch::channel(Some(true));
            return Self {
                probe_count: 0,
                result,
            };
        }

        let verdict = Arc::new(Verdict::new());
        let tasks: Vec<_> = probes
            .iter()
            .cloned()
            .map(|probe| {
                let verdict = verdict.clone();
                tokio::task::spawn_blocking(move || {
                    if let Err(err) = probe.check() {
                        debug!(error = %err, "probe failed");
                        verdict.demote();
                    }
                })
            })
            .collect();

        let (tx, result) = watch::channel(None);
        tokio::spawn(async move {
            for joined in futures::future::join_all(tasks).await {
                if let Err(err) = joined {
                    // Panicked (or cancelled) probes count as failures.
                    warn!(%err, "probe task did not complete normally");
                    verdict.demote();
                }
            }
            let _ = tx.send(Some(verdict.is_all_green()));
        });

        Self {
            probe_count: probes.len(),
            result,
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count
    }

    /// Wait for every probe to finish and return whether all of them passed.
    ///
    /// Safe to call repeatedly and from clones; always yields the same value.
    pub async fn is_all_green(&self) -> bool {
        let mut result = self.result.clone();
        loop {
            if let Some(all_green) = *result.borrow_and_update() {
                return all_green;
            }
            if result.changed().await.is_err() {
                // Collector went away without publishing (runtime shutdown).
                return (*result.borrow()).unwrap_or(false);
            }
        }
    }

    /// Like [`is_all_green`](Self::is_all_green) but gives up after `deadline`,
    /// reporting `false`. Probes already running are left to finish.
    pub async fn is_all_green_within(&self, deadline: Duration) -> bool {
        match timeout(deadline, self.is_all_green()).await {
            Ok(all_green) => all_green,
            Err(_) => {
                warn!(
                    probes = self.probe_count,
                    ?deadline,
                    "status query timed out"
                );
                false
            }
        }
    }
}
