// src/query/verdict.rs
use std::sync::atomic::{AtomicBool, Ordering};

/// The "all green" flag of one query.
///
/// Starts optimistic and can only ever be demoted; there is no way back
/// to `true` once a failure has been recorded.
#[derive(Debug)]
pub struct Verdict {
    all_green: AtomicBool,
}

impl Verdict {
    pub fn new() -> Self {
        Self {
            all_green: AtomicBool::new(true),
        }
    }

    pub fn demote(&self) {
        self.all_green.store(false, Ordering::SeqCst);
    }

    pub fn is_all_green(&self) -> bool {
        self.all_green.load(Ordering::SeqCst)
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::new()
    }
}
