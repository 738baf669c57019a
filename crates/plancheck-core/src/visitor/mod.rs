//! Traversal over plan trees.
//!
//! Traversal contract:
//! - `walk` owns all recursion: it calls the node's hook, then walks the
//!   children strictly left to right and merges their results.
//! - order is pre-order; there is no exit hook.
//! - no node is skipped, reordered, or deduplicated.
//! - the first hook error stops the walk and is returned unchanged.
//!
//! A visitor overrides only the hooks for the kinds it cares about; every
//! other kind lands in `visit_plan`, which contributes nothing by default.

mod order;
mod output;

#[cfg(test)]
mod tests;

use crate::plan::{NodeKind, PlanNode};

// re-exports
pub use order::PreOrder;
pub use output::VisitOutput;

// ============================================================================
// PlanVisitor
// ============================================================================

///
/// PlanVisitor
///
/// Per-kind hooks over a plan borrowed for `'p`, threading a context `C`.
/// Use `()` for `C` when the visitor only synthesizes `Output`.
///

pub trait PlanVisitor<'p, C> {
    type Output: VisitOutput;
    type Error;

    /// Fallback hook for every kind without a specialised one.
    fn visit_plan(
        &mut self,
        _node: &'p PlanNode,
        _ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        Ok(Self::Output::empty())
    }

    fn visit_table_scan(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_values(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_filter(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_project(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_join(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_aggregate(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_sort(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_limit(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_exchange(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_output(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }

    fn visit_extension(
        &mut self,
        node: &'p PlanNode,
        ctx: &mut C,
    ) -> Result<Self::Output, Self::Error> {
        self.visit_plan(node, ctx)
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Walk `node` and everything below it.
///
/// Recurses once per level, so stack depth grows with plan depth. Plans
/// come from the planner with bounded depth; callers building very deep
/// trees by hand should use [`PreOrder`], which keeps an explicit stack.
pub fn walk<'p, V, C>(
    visitor: &mut V,
    node: &'p PlanNode,
    ctx: &mut C,
) -> Result<V::Output, V::Error>
where
    V: PlanVisitor<'p, C> + ?Sized,
{
    let mut result = dispatch(visitor, node, ctx)?;

    for source in node.sources() {
        let child = walk(visitor, source, ctx)?;
        result = result.merge(child);
    }

    Ok(result)
}

// Route one node to its kind's hook.
fn dispatch<'p, V, C>(
    visitor: &mut V,
    node: &'p PlanNode,
    ctx: &mut C,
) -> Result<V::Output, V::Error>
where
    V: PlanVisitor<'p, C> + ?Sized,
{
    match node.kind() {
        NodeKind::TableScan { .. } => visitor.visit_table_scan(node, ctx),
        NodeKind::Values { .. } => visitor.visit_values(node, ctx),
        NodeKind::Filter { .. } => visitor.visit_filter(node, ctx),
        NodeKind::Project { .. } => visitor.visit_project(node, ctx),
        NodeKind::Join { .. } => visitor.visit_join(node, ctx),
        NodeKind::Aggregate { .. } => visitor.visit_aggregate(node, ctx),
        NodeKind::Sort { .. } => visitor.visit_sort(node, ctx),
        NodeKind::Limit { .. } => visitor.visit_limit(node, ctx),
        NodeKind::Exchange { .. } => visitor.visit_exchange(node, ctx),
        NodeKind::Output { .. } => visitor.visit_output(node, ctx),
        NodeKind::Extension { .. } => visitor.visit_extension(node, ctx),
    }
}
