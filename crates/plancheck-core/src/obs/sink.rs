//! Metrics sink boundary.
//!
//! The orchestrator MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{
    obs::metrics::{self, SanityMetrics},
    sanity::ViolationClass,
};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CheckerPassed {
        checker: &'static str,
    },
    CheckerFailed {
        checker: &'static str,
        class: ViolationClass,
    },
    PlanValidated {
        nodes: u64,
    },
    PlanRejected {
        nodes: u64,
    },
}

///
/// MetricsSink
///
/// Receives one event per checker run and one per finished plan.
/// Shared by every thread the orchestrator validates on.
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::CheckerPassed { checker } => {
                let entry = m.checkers.entry(checker.to_string()).or_default();
                entry.passed = entry.passed.saturating_add(1);
            }

            MetricsEvent::CheckerFailed { checker, class } => {
                let entry = m.checkers.entry(checker.to_string()).or_default();
                entry.failed = entry.failed.saturating_add(1);
                match class {
                    ViolationClass::Structural => {
                        m.structural_violations = m.structural_violations.saturating_add(1);
                    }
                    ViolationClass::Semantic => {
                        m.semantic_violations = m.semantic_violations.saturating_add(1);
                    }
                }
            }

            MetricsEvent::PlanValidated { nodes } => {
                m.plans_validated = m.plans_validated.saturating_add(1);
                m.nodes_checked = m.nodes_checked.saturating_add(nodes);
            }

            MetricsEvent::PlanRejected { nodes } => {
                m.plans_rejected = m.plans_rejected.saturating_add(1);
                m.nodes_checked = m.nodes_checked.saturating_add(nodes);
            }
        });
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> SanityMetrics {
    metrics::with_state(Clone::clone)
}

/// Reset the current thread's metrics state.
pub fn metrics_reset() {
    metrics::reset();
}
