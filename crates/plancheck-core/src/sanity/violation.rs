use crate::{
    plan::{Arity, PlanNodeId},
    types::{DataType, Symbol},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PlanViolation
///
/// The single diagnostic a failed sanity run surfaces. Always fatal at
/// compile time; there is no warning level.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{checker}: {detail}")]
pub struct PlanViolation {
    pub class: ViolationClass,
    pub checker: &'static str,
    pub detail: ViolationDetail,
}

impl PlanViolation {
    /// Build a violation; the class follows from the detail.
    #[must_use]
    pub fn new(checker: &'static str, detail: ViolationDetail) -> Self {
        Self {
            class: detail.class(),
            checker,
            detail,
        }
    }

    /// Violation raised by a checker defined outside this crate.
    #[must_use]
    pub fn custom(
        checker: &'static str,
        class: ViolationClass,
        message: impl Into<String>,
        nodes: Vec<PlanNodeId>,
    ) -> Self {
        Self::new(
            checker,
            ViolationDetail::Custom {
                class,
                message: message.into(),
                nodes,
            },
        )
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.detail.kind()
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.detail.to_string()
    }

    #[must_use]
    pub fn node_ids(&self) -> Vec<&PlanNodeId> {
        self.detail.node_ids()
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.class, self.checker, self.detail)
    }
}

///
/// ViolationDetail
///
/// Structured cause of one violation. Every variant names the offending
/// node ids so callers can point back into the plan.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ViolationDetail {
    #[error("generated plan contains nodes with duplicated id {id}: {first} and {second}")]
    DuplicateNodeId {
        id: PlanNodeId,
        first: String,
        second: String,
    },

    #[error("node {node} outputs symbol '{symbol}' missing from the type environment")]
    UnknownSymbol { node: PlanNodeId, symbol: Symbol },

    #[error("node {node} uses symbol '{symbol}' not produced by its sources")]
    MissingDependency { node: PlanNodeId, symbol: Symbol },

    #[error(
        "node {node} defines '{symbol}' as {declared} but the type environment records {recorded}"
    )]
    TypeMismatch {
        node: PlanNodeId,
        symbol: Symbol,
        declared: DataType,
        recorded: DataType,
    },

    #[error("{kind} node {node} expects {expected} sources, found {found}")]
    ChildArity {
        node: PlanNodeId,
        kind: String,
        expected: Arity,
        found: usize,
    },

    #[error("Values node {node} row {row} has {found} expressions, expected {expected}")]
    RowWidth {
        node: PlanNodeId,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("output node {node} is not the plan root {root}")]
    MisplacedOutput { node: PlanNodeId, root: PlanNodeId },

    #[error("{message}")]
    Custom {
        class: ViolationClass,
        message: String,
        nodes: Vec<PlanNodeId>,
    },
}

impl ViolationDetail {
    #[must_use]
    pub const fn class(&self) -> ViolationClass {
        match self {
            Self::TypeMismatch { .. } => ViolationClass::Semantic,
            Self::Custom { class, .. } => *class,
            Self::DuplicateNodeId { .. }
            | Self::UnknownSymbol { .. }
            | Self::MissingDependency { .. }
            | Self::ChildArity { .. }
            | Self::RowWidth { .. }
            | Self::MisplacedOutput { .. } => ViolationClass::Structural,
        }
    }

    /// Stable snake_case label, used for metrics and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateNodeId { .. } => "duplicate_node_id",
            Self::UnknownSymbol { .. } => "unknown_symbol",
            Self::MissingDependency { .. } => "missing_dependency",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ChildArity { .. } => "child_arity",
            Self::RowWidth { .. } => "row_width",
            Self::MisplacedOutput { .. } => "misplaced_output",
            Self::Custom { .. } => "custom",
        }
    }

    #[must_use]
    pub fn node_ids(&self) -> Vec<&PlanNodeId> {
        match self {
            Self::DuplicateNodeId { id, .. } => vec![id],
            Self::UnknownSymbol { node, .. }
            | Self::MissingDependency { node, .. }
            | Self::TypeMismatch { node, .. }
            | Self::ChildArity { node, .. }
            | Self::RowWidth { node, .. } => vec![node],
            Self::MisplacedOutput { node, root } => vec![node, root],
            Self::Custom { nodes, .. } => nodes.iter().collect(),
        }
    }
}

///
/// ViolationClass
/// Structural: the tree or its symbols are malformed.
/// Semantic: the tree is well-formed but disagrees with the type environment.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViolationClass {
    Structural,
    Semantic,
}

impl fmt::Display for ViolationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Structural => "structural",
            Self::Semantic => "semantic",
        };
        write!(f, "{label}")
    }
}
