use crate::plan::Plan;
use derive_more::Deref;
use std::sync::Arc;

///
/// ValidatedPlan
///
/// A plan that passed every configured checker. Only the orchestrator can
/// produce one, so downstream stages can take it as proof of validation.
/// Cloning shares the same immutable plan.
///

#[derive(Clone, Debug, Deref)]
#[deref(forward)]
pub struct ValidatedPlan(Arc<Plan>);

impl ValidatedPlan {
    pub(crate) fn new(plan: Plan) -> Self {
        Self(Arc::new(plan))
    }

    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.0
    }

    #[must_use]
    pub fn into_shared(self) -> Arc<Plan> {
        self.0
    }
}
