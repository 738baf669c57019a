use crate::{
    plan::{NodeKind, Plan, PlanNode},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::{Symbol, TypeEnvironment},
    visitor::{PlanVisitor, walk},
};
use std::collections::BTreeSet;

///
/// Dependencies
///
/// Every symbol a node reads must be produced by one of its sources.
/// Pass-through kinds may only output symbols their sources produce, and
/// each side of an equi-join clause must come from its own join input.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Dependencies;

impl Dependencies {
    pub const NAME: &'static str = "dependencies";
}

impl Checker for Dependencies {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        _types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        walk(&mut DependencyVisitor, plan.root(), &mut ())
    }
}

fn produced(sources: &[PlanNode]) -> BTreeSet<&Symbol> {
    sources.iter().flat_map(PlanNode::outputs).collect()
}

fn missing(node: &PlanNode, symbol: &Symbol) -> PlanViolation {
    PlanViolation::new(
        Dependencies::NAME,
        ViolationDetail::MissingDependency {
            node: node.id().clone(),
            symbol: symbol.clone(),
        },
    )
}

struct DependencyVisitor;

impl<'p> PlanVisitor<'p, ()> for DependencyVisitor {
    type Output = ();
    type Error = PlanViolation;

    fn visit_plan(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        let available = produced(node.sources());

        if let Some(symbol) = node
            .kind()
            .referenced_symbols()
            .into_iter()
            .find(|s| !available.contains(s))
        {
            return Err(missing(node, symbol));
        }

        if node.kind().passes_through()
            && let Some(symbol) = node.outputs().iter().find(|s| !available.contains(s))
        {
            return Err(missing(node, symbol));
        }

        Ok(())
    }

    fn visit_join(&mut self, node: &'p PlanNode, ctx: &mut ()) -> Result<(), PlanViolation> {
        self.visit_plan(node, ctx)?;

        let (NodeKind::Join { criteria, .. }, [left, right]) = (node.kind(), node.sources())
        else {
            // wrong child count is reported by the arity checker
            return Ok(());
        };

        for clause in criteria {
            if !left.outputs().contains(&clause.left) {
                return Err(missing(node, &clause.left));
            }
            if !right.outputs().contains(&clause.right) {
                return Err(missing(node, &clause.right));
            }
        }

        Ok(())
    }
}
