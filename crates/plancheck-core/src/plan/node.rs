use crate::{
    plan::{PlanNodeId, ScalarExpr},
    types::Symbol,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Assignment
/// `target := expr`, as used by projections and aggregations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assignment {
    pub target: Symbol,
    pub expr: ScalarExpr,
}

impl Assignment {
    #[must_use]
    pub fn new(target: impl Into<Symbol>, expr: ScalarExpr) -> Self {
        Self {
            target: target.into(),
            expr,
        }
    }

    /// Identity assignment `symbol := symbol`.
    #[must_use]
    pub fn identity(symbol: impl Into<Symbol>) -> Self {
        let symbol = symbol.into();

        Self {
            expr: ScalarExpr::Symbol(symbol.clone()),
            target: symbol,
        }
    }
}

///
/// EquiJoinClause
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EquiJoinClause {
    pub left: Symbol,
    pub right: Symbol,
}

impl EquiJoinClause {
    #[must_use]
    pub fn new(left: impl Into<Symbol>, right: impl Into<Symbol>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

///
/// ExchangeScope
/// Where an exchange moves rows: within one task or across the cluster.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ExchangeScope {
    Local,
    Remote,
}

///
/// Arity
/// Child-count contract of one operator kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, children: usize) -> bool {
        match self {
            Self::Exactly(n) => children == n,
            Self::AtLeast(n) => children >= n,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::Any => f.write_str("any number of"),
        }
    }
}

///
/// NodeKind
///
/// Operator kind of one plan node. The set is open: code outside this crate
/// models new operators through `Extension`, and matches must carry a
/// wildcard arm.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum NodeKind {
    TableScan {
        table: String,
    },
    Values {
        rows: Vec<Vec<ScalarExpr>>,
    },
    Filter {
        predicate: ScalarExpr,
    },
    Project {
        assignments: Vec<Assignment>,
    },
    Join {
        join_type: JoinType,
        criteria: Vec<EquiJoinClause>,
    },
    Aggregate {
        group_by: Vec<Symbol>,
        aggregates: Vec<Assignment>,
    },
    Sort {
        order_by: Vec<(Symbol, SortOrder)>,
    },
    Limit {
        count: u64,
    },
    Exchange {
        scope: ExchangeScope,
    },
    Output {
        column_names: Vec<String>,
    },
    Extension {
        name: String,
        references: Vec<Symbol>,
    },
}

impl NodeKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::TableScan { .. } => "TableScan",
            Self::Values { .. } => "Values",
            Self::Filter { .. } => "Filter",
            Self::Project { .. } => "Project",
            Self::Join { .. } => "Join",
            Self::Aggregate { .. } => "Aggregate",
            Self::Sort { .. } => "Sort",
            Self::Limit { .. } => "Limit",
            Self::Exchange { .. } => "Exchange",
            Self::Output { .. } => "Output",
            Self::Extension { name, .. } => name.as_str(),
        }
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::TableScan { .. } | Self::Values { .. } => Arity::Exactly(0),
            Self::Filter { .. }
            | Self::Project { .. }
            | Self::Aggregate { .. }
            | Self::Sort { .. }
            | Self::Limit { .. }
            | Self::Output { .. } => Arity::Exactly(1),
            Self::Join { .. } => Arity::Exactly(2),
            Self::Exchange { .. } => Arity::AtLeast(1),
            Self::Extension { .. } => Arity::Any,
        }
    }

    /// True when every output must be produced by a child unchanged.
    #[must_use]
    pub const fn passes_through(&self) -> bool {
        matches!(
            self,
            Self::Filter { .. }
                | Self::Join { .. }
                | Self::Sort { .. }
                | Self::Limit { .. }
                | Self::Exchange { .. }
                | Self::Output { .. }
        )
    }

    /// Symbols the operator reads from its children, in declaration order.
    #[must_use]
    pub fn referenced_symbols(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();

        match self {
            Self::TableScan { .. }
            | Self::Values { .. }
            | Self::Limit { .. }
            | Self::Exchange { .. }
            | Self::Output { .. } => {}
            Self::Filter { predicate } => predicate.collect_symbols(&mut out),
            Self::Project { assignments } => {
                for assignment in assignments {
                    assignment.expr.collect_symbols(&mut out);
                }
            }
            Self::Join { criteria, .. } => {
                for clause in criteria {
                    out.push(&clause.left);
                    out.push(&clause.right);
                }
            }
            Self::Aggregate {
                group_by,
                aggregates,
            } => {
                out.extend(group_by);
                for aggregate in aggregates {
                    aggregate.expr.collect_symbols(&mut out);
                }
            }
            Self::Sort { order_by } => out.extend(order_by.iter().map(|(symbol, _)| symbol)),
            Self::Extension { references, .. } => out.extend(references),
        }

        out
    }
}

///
/// PlanNode
///
/// One operator in the plan tree: identity, kind, ordered children, and
/// ordered output symbols. Children are owned, so every tree is finite and
/// acyclic. Nodes have no structural equality; compare them by `id()`.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlanNode {
    id: PlanNodeId,
    kind: NodeKind,
    sources: Vec<PlanNode>,
    outputs: Vec<Symbol>,
}

impl PlanNode {
    /// Assemble a node of any kind. No shape checks happen here; that is the
    /// sanity checkers' job.
    #[must_use]
    pub const fn new(
        id: PlanNodeId,
        kind: NodeKind,
        sources: Vec<Self>,
        outputs: Vec<Symbol>,
    ) -> Self {
        Self {
            id,
            kind,
            sources,
            outputs,
        }
    }

    #[must_use]
    pub fn table_scan(
        id: impl Into<PlanNodeId>,
        table: impl Into<String>,
        outputs: Vec<Symbol>,
    ) -> Self {
        Self::new(
            id.into(),
            NodeKind::TableScan {
                table: table.into(),
            },
            Vec::new(),
            outputs,
        )
    }

    #[must_use]
    pub fn values(
        id: impl Into<PlanNodeId>,
        outputs: Vec<Symbol>,
        rows: Vec<Vec<ScalarExpr>>,
    ) -> Self {
        Self::new(id.into(), NodeKind::Values { rows }, Vec::new(), outputs)
    }

    #[must_use]
    pub fn filter(id: impl Into<PlanNodeId>, source: Self, predicate: ScalarExpr) -> Self {
        let outputs = source.outputs.clone();

        Self::new(
            id.into(),
            NodeKind::Filter { predicate },
            vec![source],
            outputs,
        )
    }

    #[must_use]
    pub fn project(id: impl Into<PlanNodeId>, source: Self, assignments: Vec<Assignment>) -> Self {
        let outputs = assignments.iter().map(|a| a.target.clone()).collect();

        Self::new(
            id.into(),
            NodeKind::Project { assignments },
            vec![source],
            outputs,
        )
    }

    #[must_use]
    pub fn join(
        id: impl Into<PlanNodeId>,
        join_type: JoinType,
        left: Self,
        right: Self,
        criteria: Vec<EquiJoinClause>,
    ) -> Self {
        let outputs = left
            .outputs
            .iter()
            .chain(&right.outputs)
            .cloned()
            .collect();

        Self::new(
            id.into(),
            NodeKind::Join {
                join_type,
                criteria,
            },
            vec![left, right],
            outputs,
        )
    }

    #[must_use]
    pub fn aggregate(
        id: impl Into<PlanNodeId>,
        source: Self,
        group_by: Vec<Symbol>,
        aggregates: Vec<Assignment>,
    ) -> Self {
        let outputs = group_by
            .iter()
            .cloned()
            .chain(aggregates.iter().map(|a| a.target.clone()))
            .collect();

        Self::new(
            id.into(),
            NodeKind::Aggregate {
                group_by,
                aggregates,
            },
            vec![source],
            outputs,
        )
    }

    #[must_use]
    pub fn sort(
        id: impl Into<PlanNodeId>,
        source: Self,
        order_by: Vec<(Symbol, SortOrder)>,
    ) -> Self {
        let outputs = source.outputs.clone();

        Self::new(id.into(), NodeKind::Sort { order_by }, vec![source], outputs)
    }

    #[must_use]
    pub fn limit(id: impl Into<PlanNodeId>, source: Self, count: u64) -> Self {
        let outputs = source.outputs.clone();

        Self::new(id.into(), NodeKind::Limit { count }, vec![source], outputs)
    }

    /// Exchange over one or more sources; outputs follow the first source.
    #[must_use]
    pub fn exchange(id: impl Into<PlanNodeId>, scope: ExchangeScope, sources: Vec<Self>) -> Self {
        let outputs = sources
            .first()
            .map(|source| source.outputs.clone())
            .unwrap_or_default();

        Self::new(id.into(), NodeKind::Exchange { scope }, sources, outputs)
    }

    #[must_use]
    pub fn output(
        id: impl Into<PlanNodeId>,
        source: Self,
        column_names: Vec<String>,
        outputs: Vec<Symbol>,
    ) -> Self {
        Self::new(
            id.into(),
            NodeKind::Output { column_names },
            vec![source],
            outputs,
        )
    }

    #[must_use]
    pub fn extension(
        id: impl Into<PlanNodeId>,
        name: impl Into<String>,
        sources: Vec<Self>,
        outputs: Vec<Symbol>,
        references: Vec<Symbol>,
    ) -> Self {
        Self::new(
            id.into(),
            NodeKind::Extension {
                name: name.into(),
                references,
            },
            sources,
            outputs,
        )
    }

    #[must_use]
    pub const fn id(&self) -> &PlanNodeId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub const fn sources(&self) -> &[Self] {
        self.sources.as_slice()
    }

    #[must_use]
    pub const fn outputs(&self) -> &[Symbol] {
        self.outputs.as_slice()
    }

    /// One-line description used in diagnostics: `Kind[id] => [a, b]`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] => [", self.kind.name(), self.id)?;
        for (i, symbol) in self.outputs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        f.write_str("]")
    }
}
