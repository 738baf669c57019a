//! Plan fixtures shared by unit tests.

use crate::{
    plan::{ExchangeScope, JoinType, Plan, PlanNode, PlanNodeId, PlanNodeIdAllocator, ScalarExpr},
    types::{DataType, Symbol, TypeEnvironment},
};
use proptest::prelude::*;

pub(crate) fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|name| Symbol::from(*name)).collect()
}

pub(crate) fn scan(id: u64, columns: &[&str]) -> PlanNode {
    PlanNode::table_scan(id, "orders", symbols(columns))
}

/// Environment declaring every output of every node as `bigint`.
pub(crate) fn env_for(root: &PlanNode) -> TypeEnvironment {
    crate::visitor::PreOrder::new(root)
        .flat_map(PlanNode::outputs)
        .map(|symbol| (symbol.clone(), DataType::BIGINT))
        .collect()
}

pub(crate) fn plan(root: PlanNode) -> Plan {
    let types = env_for(&root);

    Plan::new(root, types)
}

/// Copy of `root` where the node at pre-order position `index` carries `id`.
pub(crate) fn with_id_at(root: &PlanNode, index: usize, id: &PlanNodeId) -> PlanNode {
    fn relabel(node: &PlanNode, index: usize, id: &PlanNodeId, seen: &mut usize) -> PlanNode {
        let here = *seen;
        *seen += 1;

        let sources = node
            .sources()
            .iter()
            .map(|source| relabel(source, index, id, seen))
            .collect();
        let node_id = if here == index {
            id.clone()
        } else {
            node.id().clone()
        };

        PlanNode::new(node_id, node.kind().clone(), sources, node.outputs().to_vec())
    }

    relabel(root, index, id, &mut 0)
}

///
/// Shape
/// Bare tree shape; `build` turns it into a well-formed plan with
/// pre-order ids "0", "1", ….
///

#[derive(Clone, Debug)]
pub(crate) struct Shape(pub(crate) Vec<Self>);

impl Shape {
    pub(crate) fn build(&self) -> PlanNode {
        self.build_with(&mut PlanNodeIdAllocator::new())
    }

    fn build_with(&self, ids: &mut PlanNodeIdAllocator) -> PlanNode {
        let id = ids.next_id();
        let mut sources: Vec<PlanNode> = self.0.iter().map(|s| s.build_with(ids)).collect();

        match sources.len() {
            0 => {
                let column = Symbol::new(format!("c{id}"));
                PlanNode::table_scan(id, "t", vec![column])
            }
            1 => PlanNode::filter(
                id,
                sources.remove(0),
                ScalarExpr::literal("true", DataType::BOOLEAN),
            ),
            2 => {
                let right = sources.remove(1);
                let left = sources.remove(0);
                PlanNode::join(id, JoinType::Inner, left, right, Vec::new())
            }
            _ => PlanNode::exchange(id, ExchangeScope::Remote, sources),
        }
    }
}

pub(crate) fn arb_shape() -> impl Strategy<Value = Shape> {
    Just(Shape(Vec::new())).prop_recursive(5, 64, 3, |inner| {
        prop::collection::vec(inner, 1..=3).prop_map(Shape)
    })
}
