//! Observability: sanity-run counters and the sink they are recorded through.
//!
//! Checkers never see this module; only the orchestrator records events.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{CheckerCounters, SanityMetrics};
pub use sink::{GlobalMetricsSink, MetricsEvent, MetricsSink, metrics_report, metrics_reset};
