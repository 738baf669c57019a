use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// SanityMetrics
/// Ephemeral, in-memory counters for sanity-checker runs on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SanityMetrics {
    pub plans_validated: u64,
    pub plans_rejected: u64,
    pub nodes_checked: u64,
    pub structural_violations: u64,
    pub semantic_violations: u64,
    pub checkers: BTreeMap<String, CheckerCounters>,
}

impl SanityMetrics {
    /// Counters for one checker, zeroed if it never ran.
    #[must_use]
    pub fn checker(&self, name: &str) -> CheckerCounters {
        self.checkers.get(name).copied().unwrap_or_default()
    }
}

///
/// CheckerCounters
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CheckerCounters {
    pub passed: u64,
    pub failed: u64,
}

thread_local! {
    static SANITY_METRICS: RefCell<SanityMetrics> = RefCell::new(SanityMetrics::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&SanityMetrics) -> R) -> R {
    SANITY_METRICS.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut SanityMetrics) -> R) -> R {
    SANITY_METRICS.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|m| *m = SanityMetrics::default());
}
