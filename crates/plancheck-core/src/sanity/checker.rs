use crate::{
    plan::Plan,
    sanity::{CompilationContext, PlanViolation},
    types::TypeEnvironment,
};

///
/// Checker
///
/// One independent validity rule over a whole plan.
///
/// Contract:
/// - must not mutate the plan or depend on anything outside its arguments
/// - must be deterministic: the same inputs always yield the same result
/// - reports at most one violation; the orchestrator never merges results
///

pub trait Checker: Send + Sync {
    /// Stable name used in diagnostics, logs, and metrics.
    fn name(&self) -> &'static str;

    fn validate(
        &self,
        plan: &Plan,
        ctx: &CompilationContext,
        types: &TypeEnvironment,
    ) -> Result<(), PlanViolation>;
}
