//! Planner-facing flows: plans arriving as JSON, plans built from connector
//! metadata, and visitors written outside the core crate.

use plancheck::{
    connector::{Constraint, SchemaTablePrefix},
    core::{
        obs::{metrics_report, metrics_reset},
        plan::explain,
        sanity::{SanityConfig, ViolationDetail},
        visitor::VisitOutput,
    },
    prelude::*,
};

fn ctx() -> CompilationContext {
    CompilationContext::new("q_planning")
}

const DUPLICATE_PLAN: &str = r#"{
    "id": "1",
    "kind": { "Join": { "join_type": "Inner", "criteria": [] } },
    "sources": [
        {
            "id": "2",
            "kind": { "TableScan": { "table": "orders" } },
            "sources": [],
            "outputs": ["a"]
        },
        {
            "id": "2",
            "kind": { "TableScan": { "table": "orders" } },
            "sources": [],
            "outputs": ["b"]
        }
    ],
    "outputs": ["a", "b"]
}"#;

#[test]
fn json_plan_with_duplicate_ids_is_rejected() {
    let root: PlanNode = serde_json::from_str(DUPLICATE_PLAN).unwrap();
    let types: TypeEnvironment = serde_json::from_str(r#"{"a": "bigint", "b": "bigint"}"#).unwrap();

    let err = SanityChecker::with_defaults()
        .check(Plan::new(root, types), &ctx())
        .unwrap_err();

    assert!(matches!(err.detail, ViolationDetail::DuplicateNodeId { .. }));
}

#[test]
fn config_from_json_drives_the_orchestrator() {
    let root: PlanNode = serde_json::from_str(DUPLICATE_PLAN).unwrap();
    let types: TypeEnvironment = serde_json::from_str(r#"{"a": "bigint", "b": "bigint"}"#).unwrap();
    let plan = Plan::new(root, types);

    let config =
        SanityConfig::from_json(r#"{"checkers": ["child_arity", "dependencies"]}"#).unwrap();
    let sanity = SanityChecker::from_config(&config).unwrap();

    assert_eq!(sanity.checker_names(), ["child_arity", "dependencies"]);
    assert!(sanity.validate(&plan, &ctx()).is_ok());
}

#[test]
fn scan_planned_from_connector_metadata_validates() {
    let connector = SingleTableConnector::default();
    let session = ctx().with_schema("default");

    let table = connector
        .get_table_handle(&session, &SchemaTableName::new("default", "numbers"))
        .unwrap();
    let layouts = connector
        .get_table_layouts(&session, &table, &Constraint::always_true(), None)
        .unwrap();
    let metadata = connector.get_table_metadata(&session, &table).unwrap();

    let mut ids = PlanNodeIdAllocator::new();
    let mut symbols = SymbolAllocator::new();
    let columns: Vec<Symbol> = metadata
        .columns
        .iter()
        .map(|column| symbols.new_symbol(&column.name, column.data_type.clone()))
        .collect();

    let output_id = ids.next_id();
    let scan = PlanNode::table_scan(ids.next_id(), table.table.to_string(), columns.clone());
    let names = metadata.columns.iter().map(|c| c.name.clone()).collect();
    let root = PlanNode::output(output_id, scan, names, columns);

    let plan = Plan::builder().root(root).types(symbols.types()).build().unwrap();
    let validated = SanityChecker::with_defaults().check(plan, &session).unwrap();

    assert!(layouts[0].unenforced.is_all());
    assert_eq!(
        explain(&validated),
        "- Output[0] => [value]  columns=value\n\
         \x20   - TableScan[1] => [value]  table=default.numbers\n"
    );
}

#[test]
fn listing_with_a_valid_but_unmatched_prefix_is_empty() {
    let connector = SingleTableConnector::default();

    let columns = connector
        .list_table_columns(&ctx(), &SchemaTablePrefix::table("default", "missing"))
        .unwrap();

    assert!(columns.is_empty());
}

// Counts nodes per kind name, including extension kinds this crate never
// heard of.
struct KindCounter;

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts(std::collections::BTreeMap<String, usize>);

impl VisitOutput for Counts {
    fn empty() -> Self {
        Self::default()
    }

    fn merge(mut self, next: Self) -> Self {
        for (kind, n) in next.0 {
            *self.0.entry(kind).or_default() += n;
        }
        self
    }
}

impl<'p> PlanVisitor<'p, ()> for KindCounter {
    type Output = Counts;
    type Error = std::convert::Infallible;

    fn visit_plan(&mut self, node: &'p PlanNode, _: &mut ()) -> Result<Counts, Self::Error> {
        let mut counts = Counts::default();
        counts.0.insert(node.kind().name().to_string(), 1);

        Ok(counts)
    }
}

#[test]
fn external_visitors_see_extension_nodes() {
    let unnest = PlanNode::extension(
        1_u64,
        "Unnest",
        vec![PlanNode::table_scan(2_u64, "orders", vec![Symbol::from("items")])],
        vec![Symbol::from("item")],
        vec![Symbol::from("items")],
    );
    let types: TypeEnvironment = [
        (Symbol::from("items"), DataType::new("array(bigint)")),
        (Symbol::from("item"), DataType::BIGINT),
    ]
    .into_iter()
    .collect();
    let plan = Plan::new(unnest, types);

    let Ok(counts) = walk(&mut KindCounter, plan.root(), &mut ());

    assert_eq!(counts.0.get("Unnest"), Some(&1));
    assert_eq!(counts.0.get("TableScan"), Some(&1));
    assert!(SanityChecker::with_defaults().validate(&plan, &ctx()).is_ok());
}

#[test]
fn metrics_report_reflects_this_threads_runs() {
    metrics_reset();
    let root: PlanNode = serde_json::from_str(DUPLICATE_PLAN).unwrap();
    let types: TypeEnvironment = serde_json::from_str(r#"{"a": "bigint", "b": "bigint"}"#).unwrap();

    let _ = SanityChecker::with_defaults().validate(&Plan::new(root, types), &ctx());

    let report = metrics_report();
    assert_eq!(report.plans_rejected, 1);
    assert_eq!(report.nodes_checked, 3);
    assert_eq!(report.checker("no_duplicate_ids").failed, 1);
}
