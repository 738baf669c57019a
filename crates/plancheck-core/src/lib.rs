//! Core of plancheck: the logical plan IR, its traversal framework, and the
//! sanity-checker pipeline every plan must pass before execution planning.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod obs;
pub mod plan;
pub mod sanity;
pub mod types;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only plan vocabulary and the checker seam.
/// No metrics, configuration, or error types are re-exported here.
///

pub mod prelude {
    pub use crate::{
        plan::{NodeKind, Plan, PlanNode, PlanNodeId, ScalarExpr},
        sanity::{Checker, CompilationContext, SanityChecker, ValidatedPlan},
        types::{DataType, Symbol, TypeEnvironment},
        visitor::{PlanVisitor, walk},
    };
}
