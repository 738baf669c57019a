use crate::{
    plan::{NodeKind, Plan, PlanNode, ScalarExpr},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::{Symbol, TypeEnvironment},
    visitor::{PlanVisitor, walk},
};

///
/// TypeConsistency
///
/// Where the type of a defining expression is readable without a function
/// registry (symbol references and literals), it must equal the type the
/// environment records for the symbol being defined. Calls are skipped.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TypeConsistency;

impl TypeConsistency {
    pub const NAME: &'static str = "type_consistency";
}

impl Checker for TypeConsistency {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        walk(&mut Definitions { types }, plan.root(), &mut ())
    }
}

struct Definitions<'t> {
    types: &'t TypeEnvironment,
}

impl Definitions<'_> {
    // Undeclared targets are the declared-symbols checker's concern.
    fn check(
        &self,
        node: &PlanNode,
        target: &Symbol,
        expr: &ScalarExpr,
    ) -> Result<(), PlanViolation> {
        let Some(recorded) = self.types.get(target) else {
            return Ok(());
        };
        let Some(declared) = expr.known_type(|s| self.types.get(s)) else {
            return Ok(());
        };

        if declared == recorded {
            return Ok(());
        }

        Err(PlanViolation::new(
            TypeConsistency::NAME,
            ViolationDetail::TypeMismatch {
                node: node.id().clone(),
                symbol: target.clone(),
                declared: declared.clone(),
                recorded: recorded.clone(),
            },
        ))
    }
}

impl<'p> PlanVisitor<'p, ()> for Definitions<'_> {
    type Output = ();
    type Error = PlanViolation;

    fn visit_project(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        if let NodeKind::Project { assignments } = node.kind() {
            for assignment in assignments {
                self.check(node, &assignment.target, &assignment.expr)?;
            }
        }

        Ok(())
    }

    fn visit_aggregate(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        if let NodeKind::Aggregate { aggregates, .. } = node.kind() {
            for aggregate in aggregates {
                self.check(node, &aggregate.target, &aggregate.expr)?;
            }
        }

        Ok(())
    }

    fn visit_values(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        if let NodeKind::Values { rows } = node.kind() {
            // Row width is child_arity's concern.
            for row in rows {
                for (target, expr) in node.outputs().iter().zip(row) {
                    self.check(node, target, expr)?;
                }
            }
        }

        Ok(())
    }
}
