//! Runs a compiled plan: one traversal, one operation per visited node.
//!
//! For each node the pipeline resolves the operation's column and reducer
//! through the catalog, classifies the column, reads it, applies the
//! reducer and writes the result. Anything that prevents one operation
//! from producing a value is written to the sink as a warning and the
//! walk continues. Only sink failures stop a run.

use serde::Serialize;

use crate::error::Result;
use crate::graph::{OperationGraph, TraversalScope};
use crate::operations::OperationRegistry;
use crate::plan::OperationCatalog;
use crate::results::{ResultSink, ResultValue};
use crate::table::{ColumnSource, ColumnType};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Nodes the traversal reached.
    pub visited: usize,
    /// Operations that wrote a result.
    pub succeeded: usize,
    /// Operations skipped with a warning.
    pub skipped: usize,
}

enum Outcome {
    Value(ResultValue),
    Skipped(String),
}

/// Traversal action binding a plan, its data and a results sink.
pub struct Pipeline<'a> {
    catalog: &'a dyn OperationCatalog,
    table: &'a dyn ColumnSource,
    registry: &'a OperationRegistry,
    sink: &'a mut dyn ResultSink,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline.
    pub fn new(
        catalog: &'a dyn OperationCatalog,
        table: &'a dyn ColumnSource,
        registry: &'a OperationRegistry,
        sink: &'a mut dyn ResultSink,
    ) -> Self {
        Self {
            catalog,
            table,
            registry,
            sink,
        }
    }

    /// Traverses `graph` once, running each visited node's operation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the sink fails to write.
    pub fn run(&mut self, graph: &OperationGraph, scope: TraversalScope) -> Result<RunStats> {
        let mut stats = RunStats::default();

        let traversal = graph.try_traverse(scope, |_, node| -> Result<()> {
            let id = node.id();
            match self.evaluate(id) {
                Outcome::Value(value) => {
                    tracing::debug!(operation = id, %value, "operation finished");
                    self.sink.write_result(id, &value)?;
                    stats.succeeded += 1;
                }
                Outcome::Skipped(message) => {
                    tracing::warn!(operation = id, "{message}");
                    self.sink.warning(&message)?;
                    stats.skipped += 1;
                }
            }
            Ok(())
        })?;

        stats.visited = traversal.visited;
        tracing::info!(
            visited = stats.visited,
            succeeded = stats.succeeded,
            skipped = stats.skipped,
            "run finished"
        );
        Ok(stats)
    }

    fn evaluate(&self, id: &str) -> Outcome {
        match self.try_evaluate(id) {
            Ok(outcome) => outcome,
            Err(err) => Outcome::Skipped(format!("{err}. Skipping {id}")),
        }
    }

    fn try_evaluate(&self, id: &str) -> Result<Outcome> {
        let func = self.catalog.function_name_for(id)?;
        let column = self.catalog.column_for(id)?;

        let value = match self.table.column_type(column) {
            ColumnType::Numeric => {
                let cells = self.table.read_numeric_column(column)?;
                ResultValue::Number(self.registry.invoke_numeric(func, &cells)?)
            }
            ColumnType::String => {
                let cells = self.table.read_string_column(column);
                ResultValue::Text(self.registry.invoke_text(func, &cells)?)
            }
            ColumnType::Mixed => {
                return Ok(Outcome::Skipped(format!(
                    "Mixed types found in column {column}. Skipping {id}"
                )));
            }
            ColumnType::Unknown => {
                return Ok(Outcome::Skipped(format!(
                    "Unknown type found in column {column}. Skipping {id}"
                )));
            }
        };
        Ok(Outcome::Value(value))
    }
}
