use super::{PlanVisitor, PreOrder, walk};
use crate::{
    plan::{JoinType, PlanNode, PlanNodeId, ScalarExpr},
    test_support::{arb_shape, scan},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// Synthesizes the visit order as its result.
struct RecordOrder;

impl<'p> PlanVisitor<'p, ()> for RecordOrder {
    type Output = Vec<PlanNodeId>;
    type Error = ();

    fn visit_plan(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<Self::Output, ()> {
        Ok(vec![node.id().clone()])
    }
}

// Records kind names into the threaded context instead of the result.
struct RecordKinds;

impl<'p> PlanVisitor<'p, Vec<String>> for RecordKinds {
    type Output = ();
    type Error = ();

    fn visit_plan(&mut self, node: &'p PlanNode, ctx: &mut Vec<String>) -> Result<(), ()> {
        ctx.push(node.kind().name().to_string());
        Ok(())
    }
}

// Only specialises filters; everything else takes the default.
struct CountFilters;

impl<'p> PlanVisitor<'p, ()> for CountFilters {
    type Output = usize;
    type Error = ();

    fn visit_filter(&mut self, _: &'p PlanNode, _: &mut ()) -> Result<usize, ()> {
        Ok(1)
    }
}

// Fails on one id and records everything it saw before.
struct StopAt(PlanNodeId);

impl<'p> PlanVisitor<'p, Vec<&'p PlanNodeId>> for StopAt {
    type Output = ();
    type Error = &'p PlanNodeId;

    fn visit_plan(
        &mut self,
        node: &'p PlanNode,
        seen: &mut Vec<&'p PlanNodeId>,
    ) -> Result<(), &'p PlanNodeId> {
        if *node.id() == self.0 {
            return Err(node.id());
        }
        seen.push(node.id());

        Ok(())
    }
}

//   1 Join
//   ├── 2 Filter
//   │   └── 3 Scan
//   └── 4 Join
//       ├── 5 Scan
//       └── 6 Scan
fn sample() -> PlanNode {
    PlanNode::join(
        1_u64,
        JoinType::Inner,
        PlanNode::filter(2_u64, scan(3, &["a"]), ScalarExpr::symbol("a")),
        PlanNode::join(
            4_u64,
            JoinType::Left,
            scan(5, &["b"]),
            scan(6, &["c"]),
            Vec::new(),
        ),
        Vec::new(),
    )
}

fn ids(raw: &[u64]) -> Vec<PlanNodeId> {
    raw.iter().copied().map(PlanNodeId::from).collect()
}

#[test]
fn walk_is_pre_order_left_to_right() {
    let root = sample();

    let order = walk(&mut RecordOrder, &root, &mut ()).unwrap();

    assert_eq!(order, ids(&[1, 2, 3, 4, 5, 6]));
}

#[test]
fn pre_order_iterator_matches_walk() {
    let root = sample();

    let iterated: Vec<_> = PreOrder::new(&root).map(|n| n.id().clone()).collect();

    assert_eq!(iterated, walk(&mut RecordOrder, &root, &mut ()).unwrap());
}

#[test]
fn context_is_threaded_through_the_whole_walk() {
    let root = sample();
    let mut kinds = Vec::new();

    walk(&mut RecordKinds, &root, &mut kinds).unwrap();

    assert_eq!(
        kinds,
        ["Join", "Filter", "TableScan", "Join", "TableScan", "TableScan"]
    );
}

#[test]
fn unspecialised_kinds_still_reach_nested_specialised_ones() {
    let root = PlanNode::join(
        1_u64,
        JoinType::Inner,
        PlanNode::filter(2_u64, scan(3, &["a"]), ScalarExpr::symbol("a")),
        PlanNode::filter(
            4_u64,
            PlanNode::filter(5_u64, scan(6, &["b"]), ScalarExpr::symbol("b")),
            ScalarExpr::symbol("b"),
        ),
        Vec::new(),
    );

    assert_eq!(walk(&mut CountFilters, &root, &mut ()).unwrap(), 3);
}

#[test]
fn first_error_stops_the_walk() {
    let root = sample();
    let mut seen = Vec::new();

    let err = walk(&mut StopAt(PlanNodeId::from(4_u64)), &root, &mut seen).unwrap_err();

    assert_eq!(err, &PlanNodeId::from(4_u64));
    assert_eq!(seen, ids(&[1, 2, 3]).iter().collect::<Vec<_>>());
}

#[test]
fn dyn_visitors_can_be_walked() {
    let root = sample();
    let visitor: &mut dyn PlanVisitor<'_, (), Output = usize, Error = ()> = &mut CountFilters;

    assert_eq!(walk(visitor, &root, &mut ()).unwrap(), 1);
}

#[test]
fn deep_chains_are_walked_to_the_leaf() {
    let mut node = scan(0, &["a"]);
    for id in 1..=256_u64 {
        node = PlanNode::filter(id, node, ScalarExpr::symbol("a"));
    }

    let order = walk(&mut RecordOrder, &node, &mut ()).unwrap();

    assert_eq!(order.len(), 257);
    assert_eq!(order.first(), Some(&PlanNodeId::from(256_u64)));
    assert_eq!(order.last(), Some(&PlanNodeId::from(0_u64)));
    assert_eq!(PreOrder::new(&node).count(), order.len());
}

proptest! {
    #[test]
    fn walk_visits_every_node_exactly_once(shape in arb_shape()) {
        let root = shape.build();

        let order = walk(&mut RecordOrder, &root, &mut ()).unwrap();
        let iterated: Vec<_> = PreOrder::new(&root).map(|n| n.id().clone()).collect();
        let distinct: BTreeSet<_> = order.iter().collect();

        prop_assert_eq!(&order, &iterated);
        prop_assert_eq!(distinct.len(), order.len());
        // Shape::build numbers nodes in pre-order, so the walk must see 0, 1, 2, ….
        let expected: Vec<_> = (0..order.len() as u64).map(PlanNodeId::from).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn walk_is_repeatable(shape in arb_shape()) {
        let root = shape.build();

        let first = walk(&mut RecordOrder, &root, &mut ()).unwrap();
        let second = walk(&mut RecordOrder, &root, &mut ()).unwrap();

        prop_assert_eq!(first, second);
    }
}
