use crate::{
    error::Error,
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    plan::{Plan, PlanBuilder},
    sanity::{
        BuiltinChecker, Checker, CompilationContext, PlanViolation, SanityConfig,
        SanityConfigError, ValidatedPlan, default_checkers,
    },
};
use std::{fmt, sync::Arc};
use tracing::Level;

///
/// SanityChecker
///
/// Runs an ordered list of checkers against a plan and stops at the first
/// violation. Later checkers are never invoked once one fails, and failures
/// are never merged.
///
/// Immutable after construction; one instance may validate distinct plans
/// on any number of threads.
///

pub struct SanityChecker {
    checkers: Vec<Box<dyn Checker>>,
    sink: Arc<dyn MetricsSink>,
}

impl SanityChecker {
    /// Orchestrator over exactly `checkers`, in the given order.
    #[must_use]
    pub fn new(checkers: Vec<Box<dyn Checker>>) -> Self {
        Self {
            checkers,
            sink: Arc::new(GlobalMetricsSink),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_checkers())
    }

    pub fn from_config(config: &SanityConfig) -> Result<Self, SanityConfigError> {
        config.validate()?;

        let checkers = config
            .checkers
            .iter()
            .copied()
            .map(BuiltinChecker::instantiate)
            .collect();

        Ok(Self::new(checkers))
    }

    /// Replace the metrics sink; the default writes thread-local counters.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn checker_names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Run every checker in registration order against the plan's own
    /// type environment.
    pub fn validate(&self, plan: &Plan, ctx: &CompilationContext) -> Result<(), PlanViolation> {
        let nodes = u64::try_from(plan.node_count()).unwrap_or(u64::MAX);
        let types = plan.types();

        for checker in &self.checkers {
            let name = checker.name();
            tracing::event!(
                Level::DEBUG,
                query_id = ctx.query_id(),
                checker = name,
                "running sanity checker"
            );

            if let Err(violation) = checker.validate(plan, ctx, types) {
                tracing::event!(
                    Level::WARN,
                    query_id = ctx.query_id(),
                    checker = name,
                    class = %violation.class,
                    kind = violation.kind(),
                    "plan rejected: {}",
                    violation.detail
                );
                self.sink.record(MetricsEvent::CheckerFailed {
                    checker: name,
                    class: violation.class,
                });
                self.sink.record(MetricsEvent::PlanRejected { nodes });

                return Err(violation);
            }

            tracing::event!(Level::TRACE, checker = name, "sanity checker passed");
            self.sink.record(MetricsEvent::CheckerPassed { checker: name });
        }

        tracing::event!(
            Level::DEBUG,
            query_id = ctx.query_id(),
            checkers = self.checkers.len(),
            nodes,
            "plan validated"
        );
        self.sink.record(MetricsEvent::PlanValidated { nodes });

        Ok(())
    }

    /// Validate and seal the plan for downstream stages.
    pub fn check(
        &self,
        plan: Plan,
        ctx: &CompilationContext,
    ) -> Result<ValidatedPlan, PlanViolation> {
        self.validate(&plan, ctx)?;

        Ok(ValidatedPlan::new(plan))
    }

    /// Build the plan, then validate it.
    pub fn check_builder(
        &self,
        builder: PlanBuilder,
        ctx: &CompilationContext,
    ) -> Result<ValidatedPlan, Error> {
        let plan = builder.build()?;

        Ok(self.check(plan, ctx)?)
    }
}

impl Default for SanityChecker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SanityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanityChecker")
            .field("checkers", &self.checker_names())
            .finish_non_exhaustive()
    }
}
