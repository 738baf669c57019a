use crate::{
    plan::{NodeKind, Plan, PlanNode},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::TypeEnvironment,
    visitor::{PlanVisitor, walk},
};

///
/// ChildArity
/// Each node has exactly as many sources as its kind declares, and every
/// `Values` row has one expression per output.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ChildArity;

impl ChildArity {
    pub const NAME: &'static str = "child_arity";
}

impl Checker for ChildArity {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        _types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        walk(&mut ArityVisitor, plan.root(), &mut ())
    }
}

struct ArityVisitor;

impl<'p> PlanVisitor<'p, ()> for ArityVisitor {
    type Output = ();
    type Error = PlanViolation;

    fn visit_plan(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        let expected = node.kind().arity();
        let found = node.sources().len();

        if !expected.accepts(found) {
            return Err(PlanViolation::new(
                ChildArity::NAME,
                ViolationDetail::ChildArity {
                    node: node.id().clone(),
                    kind: node.kind().name().to_string(),
                    expected,
                    found,
                },
            ));
        }

        if let NodeKind::Values { rows } = node.kind() {
            let width = node.outputs().len();

            if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(PlanViolation::new(
                    ChildArity::NAME,
                    ViolationDetail::RowWidth {
                        node: node.id().clone(),
                        row,
                        expected: width,
                        found: values.len(),
                    },
                ));
            }
        }

        Ok(())
    }
}
