//! # opgraph core
//!
//! Plans of column operations described as chains and run exactly once.
//!
//! A plan file names a data table and the operations available on it. A
//! scheme such as `1->2->3` wires those operations into a directed graph;
//! the graph is then walked depth-first and every reachable operation runs
//! once, even when the graph has cycles or diamonds.
//!
//! ## Features
//!
//! - **Graph store**: arena-backed nodes with generational handles, an
//!   insertion-ordered registry and per-node adjacency lists
//! - **Safe deletion**: incoming edges are stripped before a node leaves
//! - **Visit-once traversal**: iterative depth-first walk, cycle safe
//! - **Scheme compiler**: per-line findings, all-or-nothing compilation
//! - **Runner**: YAML plans, CSV tables, built-in reducers, results log
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use opgraph_core::{
//!     OperationGraph, OperationRegistry, Pipeline, PlanConfig, ResultLog,
//!     SchemeCompiler, TraversalScope, DataTable,
//! };
//!
//! let plan = PlanConfig::from_file("data/plan.yaml")?;
//! let table = DataTable::from_path(plan.data_path(), plan.delimiter_byte()?, plan.has_header)?;
//! let registry = OperationRegistry::with_builtins();
//!
//! let mut graph = OperationGraph::new();
//! SchemeCompiler::indexed(plan.operation_ids()).compile(&["1->2", "2->3"], &mut graph)?;
//!
//! let mut log = ResultLog::create("data/results.log")?;
//! Pipeline::new(&plan, &table, &registry, &mut log).run(&graph, TraversalScope::FromFirst)?;
//! graph.clear_graph();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// =============================================================================
// NUMERIC CAST LINTS
// =============================================================================
// Reducers report counts and averages as f64.
#![allow(clippy::cast_precision_loss)]
// =============================================================================
// STYLISTIC LINTS - Safe to allow globally (no bug risk)
// =============================================================================
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod graph;
pub mod operations;
#[cfg(test)]
mod operations_tests;
pub mod pipeline;
#[cfg(test)]
mod pipeline_tests;
pub mod plan;
pub mod results;
pub mod scheme;
pub mod settings;
#[cfg(test)]
mod settings_tests;
pub mod table;

pub use error::{Error, Result};
pub use graph::{
    GraphNode, NodeId, NodeVisitor, OperationGraph, TraversalScope, TraversalStats, VisitRecorder,
};
pub use operations::{OperationRegistry, ReducerKind};
pub use pipeline::{Pipeline, RunStats};
pub use plan::{discover_plans, OperationCatalog, OperationConfig, PlanConfig};
pub use results::{ResultLog, ResultSink, ResultValue};
pub use scheme::{
    read_scheme, CompileSummary, SchemeCompiler, SchemeFinding, SchemeGrammar, SchemeReader,
    SchemeReport,
};
pub use settings::{GrammarKind, Settings, SettingsError};
pub use table::{ColumnSource, ColumnType, DataTable};
