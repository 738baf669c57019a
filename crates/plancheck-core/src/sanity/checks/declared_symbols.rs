use crate::{
    plan::{Plan, PlanNode},
    sanity::{Checker, CompilationContext, PlanViolation, ViolationDetail},
    types::TypeEnvironment,
    visitor::{PlanVisitor, walk},
};

///
/// DeclaredSymbols
/// Every output symbol of every node is declared in the type environment.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredSymbols;

impl DeclaredSymbols {
    pub const NAME: &'static str = "declared_symbols";
}

impl Checker for DeclaredSymbols {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        plan: &Plan,
        _ctx: &CompilationContext,
        types: &TypeEnvironment,
    ) -> Result<(), PlanViolation> {
        walk(&mut OutputsDeclared { types }, plan.root(), &mut ())
    }
}

struct OutputsDeclared<'t> {
    types: &'t TypeEnvironment,
}

impl<'p> PlanVisitor<'p, ()> for OutputsDeclared<'_> {
    type Output = ();
    type Error = PlanViolation;

    fn visit_plan(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<(), PlanViolation> {
        match node.outputs().iter().find(|s| !self.types.contains(s)) {
            None => Ok(()),
            Some(symbol) => Err(PlanViolation::new(
                DeclaredSymbols::NAME,
                ViolationDetail::UnknownSymbol {
                    node: node.id().clone(),
                    symbol: symbol.clone(),
                },
            )),
        }
    }
}
