use crate::{
    plan::{Plan, PlanNode, PlanNodeId},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::TypeEnvironment,
    visitor::{PlanVisitor, walk},
};
use std::collections::{BTreeMap, btree_map::Entry};

///
/// NoDuplicatePlanNodeIds
///
/// Rejects any plan where two nodes share a `PlanNodeId`. The walk is
/// pre-order, so the reported pair is always the first collision in that
/// order: the earliest node holding the id and the node that repeats it.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatePlanNodeIds;

impl NoDuplicatePlanNodeIds {
    pub const NAME: &'static str = "no_duplicate_ids";
}

impl Checker for NoDuplicatePlanNodeIds {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        _types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        walk(&mut FirstSeen, plan.root(), &mut BTreeMap::new())
    }
}

// Remembers the first node seen for every id.
struct FirstSeen;

impl<'p> PlanVisitor<'p, BTreeMap<&'p PlanNodeId, &'p PlanNode>> for FirstSeen {
    type Output = ();
    type Error = PlanViolation;

    fn visit_plan(
        &mut self,
        node: &'p PlanNode,
        seen: &mut BTreeMap<&'p PlanNodeId, &'p PlanNode>,
    ) -> Result<(), PlanViolation> {
        match seen.entry(node.id()) {
            Entry::Vacant(slot) => {
                slot.insert(node);
                Ok(())
            }
            Entry::Occupied(slot) => Err(PlanViolation::new(
                NoDuplicatePlanNodeIds::NAME,
                ViolationDetail::DuplicateNodeId {
                    id: node.id().clone(),
                    first: slot.get().describe(),
                    second: node.describe(),
                },
            )),
        }
    }
}
