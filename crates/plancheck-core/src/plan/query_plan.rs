//! Plan aggregate root; must not run validation itself.

use crate::{
    plan::PlanNode,
    types::{Symbol, TypeEnvironment},
    visitor::PreOrder,
};
use thiserror::Error as ThisError;

///
/// PlanError
///
/// Construction failures. A plan is never partially valid: without a root
/// and an environment there is nothing to hand to the sanity checkers.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    #[error("plan root is missing")]
    MissingRoot,

    #[error("plan type environment is missing")]
    MissingTypes,
}

///
/// Plan
///
/// One root node plus the type environment it is bound to.
/// Immutable after construction and safe to share across threads.
///

#[derive(Clone, Debug)]
pub struct Plan {
    root: PlanNode,
    types: TypeEnvironment,
}

impl Plan {
    #[must_use]
    pub const fn new(root: PlanNode, types: TypeEnvironment) -> Self {
        Self { root, types }
    }

    #[must_use]
    pub fn builder() -> PlanBuilder {
        PlanBuilder::default()
    }

    #[must_use]
    pub const fn root(&self) -> &PlanNode {
        &self.root
    }

    #[must_use]
    pub const fn types(&self) -> &TypeEnvironment {
        &self.types
    }

    /// Output symbols of the whole plan.
    #[must_use]
    pub const fn outputs(&self) -> &[Symbol] {
        self.root.outputs()
    }

    /// Iterate every node, parent before children, left to right.
    #[must_use]
    pub fn nodes(&self) -> PreOrder<'_> {
        PreOrder::new(&self.root)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    #[must_use]
    pub fn into_parts(self) -> (PlanNode, TypeEnvironment) {
        (self.root, self.types)
    }
}

///
/// PlanBuilder
///
/// Staging area for producers that assemble the root and environment
/// separately; `build` refuses to emit a plan missing either half.
///

#[derive(Debug, Default)]
pub struct PlanBuilder {
    root: Option<PlanNode>,
    types: Option<TypeEnvironment>,
}

impl PlanBuilder {
    #[must_use]
    pub fn root(mut self, root: PlanNode) -> Self {
        self.root = Some(root);
        self
    }

    #[must_use]
    pub fn types(mut self, types: TypeEnvironment) -> Self {
        self.types = Some(types);
        self
    }

    pub fn build(self) -> Result<Plan, PlanError> {
        let root = self.root.ok_or(PlanError::MissingRoot)?;
        let types = self.types.ok_or(PlanError::MissingTypes)?;

        Ok(Plan::new(root, types))
    }
}
