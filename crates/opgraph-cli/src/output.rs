//! Console output: operation listings and run summaries.

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;

use opgraph_core::{CompileSummary, OperationRegistry, PlanConfig, RunStats};

use crate::OutputFormat;

/// Everything reported after a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub plan: PathBuf,
    pub results: PathBuf,
    pub compiled: CompileSummary,
    pub stats: RunStats,
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

/// Prints the plan's operations, numbered as scheme indices.
pub fn print_operations(plan: &PlanConfig, registry: &OperationRegistry) {
    let mut table = new_table(&["#", "Operation", "Function", "Column"]);
    for (i, (id, op)) in plan.operations.iter().enumerate() {
        let func = if registry.contains(&op.func) {
            Cell::new(&op.func)
        } else {
            Cell::new(format!("{} (unknown)", op.func)).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(id),
            func,
            Cell::new(op.column),
        ]);
    }

    println!("\n{}", "Available operations".green().bold());
    println!("{table}");
}

/// Prints the reducer functions a plan may use.
pub fn print_functions(registry: &OperationRegistry) {
    let mut table = new_table(&["Function", "Input"]);
    for name in registry.names() {
        let kind = registry
            .kind(name)
            .map_or_else(String::new, |k| k.to_string());
        table.add_row(vec![Cell::new(name), Cell::new(kind)]);
    }
    println!("{table}");
}

/// Prints the outcome of `check` for a valid scheme.
pub fn print_check(compiled: &CompileSummary, nodes: usize) {
    println!(
        "{} {} line(s), {} operation(s), {} edge(s)",
        "Scheme is valid:".green().bold(),
        compiled.lines,
        nodes,
        compiled.edges_created
    );
}

/// Prints the run summary as a table or JSON.
pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Table => {
            println!("\n{}", "Run Summary".green().bold());
            println!("  Plan:             {}", summary.plan.display());
            println!("  Operations:       {}", summary.compiled.nodes_created);
            println!("  Edges:            {}", summary.compiled.edges_created);
            println!("  Visited:          {}", summary.stats.visited);
            println!(
                "  Succeeded:        {}",
                summary.stats.succeeded.to_string().green()
            );
            if summary.stats.skipped > 0 {
                println!(
                    "  Skipped:          {}",
                    summary.stats.skipped.to_string().yellow()
                );
            }
            println!("  Results:          {}", summary.results.display());
        }
    }
    Ok(())
}
