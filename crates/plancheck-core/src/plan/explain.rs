use crate::plan::{NodeKind, Plan, PlanNode};
use std::fmt::Write;

/// Render a plan as an indented tree, one node per line.
///
/// ```text
/// - Join[1] => [a, b]
///     - TableScan[2] => [a]  table=orders
///     - TableScan[3] => [b]  table=lines
/// ```
#[must_use]
pub fn explain(plan: &Plan) -> String {
    let mut out = String::new();
    explain_node(plan.root(), 0, &mut out);

    out
}

fn explain_node(node: &PlanNode, depth: usize, out: &mut String) {
    let indent = "    ".repeat(depth);
    let _ = write!(out, "{indent}- {node}");

    if let Some(detail) = detail(node.kind()) {
        let _ = write!(out, "  {detail}");
    }
    out.push('\n');

    for source in node.sources() {
        explain_node(source, depth + 1, out);
    }
}

fn detail(kind: &NodeKind) -> Option<String> {
    match kind {
        NodeKind::TableScan { table } => Some(format!("table={table}")),
        NodeKind::Filter { predicate } => Some(format!("predicate={predicate}")),
        NodeKind::Limit { count } => Some(format!("count={count}")),
        NodeKind::Exchange { scope } => Some(format!("scope={scope:?}")),
        NodeKind::Join { join_type, .. } => Some(format!("type={join_type:?}")),
        NodeKind::Output { column_names } => Some(format!("columns={}", column_names.join(","))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        plan::{JoinType, ScalarExpr},
        types::{DataType, Symbol, TypeEnvironment},
    };

    #[test]
    fn explain_indents_children_under_parents() {
        let root = PlanNode::join(
            1_u64,
            JoinType::Inner,
            PlanNode::table_scan(2_u64, "orders", vec![Symbol::from("a")]),
            PlanNode::filter(
                3_u64,
                PlanNode::table_scan(4_u64, "lines", vec![Symbol::from("b")]),
                ScalarExpr::symbol("b"),
            ),
            Vec::new(),
        );
        let types: TypeEnvironment = [
            (Symbol::from("a"), DataType::BIGINT),
            (Symbol::from("b"), DataType::BOOLEAN),
        ]
        .into_iter()
        .collect();

        let text = explain(&Plan::new(root, types));

        assert_eq!(
            text,
            "- Join[1] => [a, b]  type=Inner\n\
             \x20   - TableScan[2] => [a]  table=orders\n\
             \x20   - Filter[3] => [b]  predicate=b\n\
             \x20       - TableScan[4] => [b]  table=lines\n"
        );
    }
}
