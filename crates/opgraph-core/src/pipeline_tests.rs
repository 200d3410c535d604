//! Tests for pipeline module

use crate::graph::{OperationGraph, TraversalScope};
use crate::operations::OperationRegistry;
use crate::pipeline::*;
use crate::plan::PlanConfig;
use crate::results::{ResultLog, ResultSink, ResultValue};
use crate::scheme::SchemeCompiler;
use crate::table::DataTable;
use std::io;

const PLAN: &str = "
path: table.csv
operations:
  total:  { func: sum, column: 0 }
  names:  { func: concatenate, column: 1 }
  mixed:  { func: sum, column: 2 }
  absent: { func: max, column: 9 }
  wrong:  { func: concatenate, column: 0 }
";

fn table() -> DataTable {
    DataTable::from_rows([
        vec!["1", "a", "1"],
        vec!["2", "b", "x"],
        vec!["3.5", "c", "2"],
    ])
}

fn run(scheme: &[&str], scope: TraversalScope) -> (RunStats, String) {
    let plan = PlanConfig::from_yaml(PLAN).unwrap();
    let table = table();
    let registry = OperationRegistry::with_builtins();
    let mut graph = OperationGraph::new();
    SchemeCompiler::literal().compile(scheme, &mut graph).unwrap();

    let mut log = ResultLog::new(Vec::new());
    let stats = Pipeline::new(&plan, &table, &registry, &mut log)
        .run(&graph, scope)
        .unwrap();
    graph.clear_graph();

    let text = String::from_utf8(log.into_inner().unwrap()).unwrap();
    (stats, text)
}

#[test]
fn test_runs_operations_in_visit_order() {
    let (stats, text) = run(&["total->names"], TraversalScope::FromFirst);

    assert_eq!(text, "total >> 6.5\nnames >> abc\n");
    assert_eq!(
        stats,
        RunStats {
            visited: 2,
            succeeded: 2,
            skipped: 0,
        }
    );
}

#[test]
fn test_mixed_and_unknown_columns_are_skipped() {
    let (stats, text) = run(&["total->mixed->absent->names"], TraversalScope::FromFirst);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "total >> 6.5",
            "Mixed types found in column 2. Skipping mixed",
            "Unknown type found in column 9. Skipping absent",
            "names >> abc",
        ]
    );
    assert_eq!(stats.succeeded, 2);
    assert_eq!(stats.skipped, 2);
}

#[test]
fn test_unconfigured_operation_is_skipped() {
    let (stats, text) = run(&["total->ghost"], TraversalScope::FromFirst);

    assert!(text.contains("ghost"));
    assert!(text.contains("OPG-001"));
    assert_eq!(stats.visited, 2);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_kind_mismatch_is_skipped() {
    let (stats, text) = run(&["wrong"], TraversalScope::FromFirst);

    assert!(text.contains("OPG-003"));
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.succeeded, 0);
}

#[test]
fn test_cycles_run_each_operation_once() {
    let (stats, text) = run(&["total->names->total"], TraversalScope::FromFirst);

    assert_eq!(text.lines().count(), 2);
    assert_eq!(stats.visited, 2);
}

#[test]
fn test_scope_all_reaches_disconnected_chains() {
    let (first, _) = run(&["total", "names"], TraversalScope::FromFirst);
    let (all, text) = run(&["total", "names"], TraversalScope::AllNodes);

    assert_eq!(first.visited, 1);
    assert_eq!(all.visited, 2);
    assert!(text.contains("names >> abc"));
}

#[test]
fn test_empty_graph_runs_nothing() {
    let (stats, text) = run(&[], TraversalScope::FromFirst);

    assert_eq!(stats, RunStats::default());
    assert!(text.is_empty());
}

struct FailingSink;

impl ResultSink for FailingSink {
    fn write_result(&mut self, _id: &str, _value: &ResultValue) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn warning(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_aborts_run() {
    let plan = PlanConfig::from_yaml(PLAN).unwrap();
    let table = table();
    let registry = OperationRegistry::with_builtins();
    let mut graph = OperationGraph::new();
    SchemeCompiler::literal()
        .compile(&["total->names"], &mut graph)
        .unwrap();
    let mut sink = FailingSink;

    let err = Pipeline::new(&plan, &table, &registry, &mut sink)
        .run(&graph, TraversalScope::FromFirst)
        .unwrap_err();

    assert_eq!(err.code(), "OPG-010");
    assert!(!err.is_recoverable());
}
