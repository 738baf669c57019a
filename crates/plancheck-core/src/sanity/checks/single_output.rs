use crate::{
    plan::{Plan, PlanNode},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::TypeEnvironment,
    visitor::{PlanVisitor, walk},
};
use std::ptr;

///
/// SingleOutput
/// An `Output` node may only appear as the plan root, so a plan has at
/// most one.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SingleOutput;

impl SingleOutput {
    pub const NAME: &'static str = "single_output";
}

impl Checker for SingleOutput {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        _types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        let root = plan.root();

        walk(&mut OutputAtRoot { root }, root, &mut ())
    }
}

// Ids may repeat, so the root is recognised by address.
struct OutputAtRoot<'p> {
    root: &'p PlanNode,
}

impl<'p> PlanVisitor<'p, ()> for OutputAtRoot<'p> {
    type Output = ();
    type Error = PlanViolation;

    fn visit_output(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        if ptr::eq(node, self.root) {
            return Ok(());
        }

        Err(PlanViolation::new(
            SingleOutput::NAME,
            ViolationDetail::MisplacedOutput {
                node: node.id().clone(),
                root: self.root.id().clone(),
            },
        ))
    }
}
