//! Plan module wiring; must not implement validation logic.

mod explain;
mod expr;
mod id;
mod node;
mod query_plan;

// re-exports
pub use explain::explain;
pub use expr::ScalarExpr;
pub use id::{PlanNodeId, PlanNodeIdAllocator};
pub use node::{
    Arity, Assignment, EquiJoinClause, ExchangeScope, JoinType, NodeKind, PlanNode, SortOrder,
};
pub use query_plan::{Plan, PlanBuilder, PlanError};
