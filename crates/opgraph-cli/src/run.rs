//! `run` and `check` commands.
//!
//! A run follows one fixed order: load the plan and its table, read and
//! compile the scheme, traverse once, clear the graph.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use opgraph_core::{
    discover_plans, read_scheme, CompileSummary, DataTable, GrammarKind, OperationCatalog,
    OperationGraph, OperationRegistry, Pipeline, PlanConfig, ResultLog, RunStats,
    SchemeCompiler, Settings, TraversalScope,
};

use crate::output::{self, RunSummary};
use crate::prompts::PlanPrompts;
use crate::scheme_input;
use crate::OutputFormat;

/// Resolved options for one `run`.
pub struct RunOptions {
    pub plan: Option<PathBuf>,
    pub scheme: Option<PathBuf>,
    pub grammar: GrammarKind,
    pub scope: TraversalScope,
    pub data_dir: PathBuf,
    pub results: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Loads and validates a plan file.
pub fn load_plan(path: &Path) -> Result<PlanConfig> {
    let plan = PlanConfig::from_file(path)
        .with_context(|| format!("Failed to load plan {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}

/// Picks the plan: explicit path, the only discovered file, or a prompt.
fn select_plan(explicit: Option<&Path>, data_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let mut plans = discover_plans(data_dir)
        .with_context(|| format!("Failed to list plans in {}", data_dir.display()))?;
    match plans.len() {
        0 => bail!("No plan files (*.yaml, *.yml) found in {}", data_dir.display()),
        1 => Ok(plans.remove(0)),
        _ if io::stdin().is_terminal() => PlanPrompts::new().select_plan(&plans),
        n => bail!(
            "{} plan files found in {}; choose one with --plan",
            n,
            data_dir.display()
        ),
    }
}

fn ensure_known_functions(plan: &PlanConfig, registry: &OperationRegistry) -> Result<()> {
    let unknown = plan.unknown_functions(registry);
    if unknown.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = unknown
        .iter()
        .map(|(id, func)| format!("id: {id}, function: {func}"))
        .collect();
    bail!(
        "Unknown functions in plan: {}. Available functions: {}",
        listed.join("; "),
        registry.names().join(", ")
    )
}

fn load_table(plan: &PlanConfig) -> Result<DataTable> {
    let path = plan.data_path();
    DataTable::from_path(&path, plan.delimiter_byte()?, plan.has_header)
        .with_context(|| format!("Failed to read data file {}", path.display()))
}

fn read_scheme_file(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open scheme {}", path.display()))?;
    Ok(read_scheme(BufReader::new(file))?)
}

fn results_path(settings: &Settings, plan: &PlanConfig, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    settings
        .results_dir(plan.base_dir())
        .join(format!("results-{stamp}.log"))
}

/// Compiles a scheme from a file, or interactively from stdin.
fn compile_scheme(
    compiler: &SchemeCompiler,
    scheme: Option<&Path>,
    graph: &mut OperationGraph,
) -> Result<CompileSummary> {
    let lines = match scheme {
        Some(path) => read_scheme_file(path)?,
        None => scheme_input::prompt_until_valid(compiler, io::stdin().lock())?,
    };
    Ok(compiler
        .compile(&lines, graph)
        .map_err(opgraph_core::Error::from)?)
}

/// Executes `opgraph run`.
pub fn execute(settings: &Settings, options: &RunOptions) -> Result<()> {
    let plan_path = select_plan(options.plan.as_deref(), &options.data_dir)?;
    let plan = load_plan(&plan_path)?;
    let registry = OperationRegistry::with_builtins();
    ensure_known_functions(&plan, &registry)?;
    let table = load_table(&plan)?;

    if options.format == OutputFormat::Table {
        output::print_operations(&plan, &registry);
    }

    let compiler = SchemeCompiler::new(options.grammar.grammar(plan.operation_ids()));
    let mut graph = OperationGraph::new();
    let compiled = compile_scheme(&compiler, options.scheme.as_deref(), &mut graph)?;

    let results = results_path(settings, &plan, options.results.as_deref());
    if let Some(parent) = results.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut log = ResultLog::create(&results)
        .with_context(|| format!("Failed to create results log {}", results.display()))?;

    let run = Pipeline::new(&plan, &table, &registry, &mut log).run(&graph, options.scope);
    graph.clear_graph();
    let stats: RunStats = run?;
    log.into_inner()
        .with_context(|| format!("Failed to write results log {}", results.display()))?;

    output::print_summary(
        &RunSummary {
            plan: plan_path,
            results,
            compiled,
            stats,
        },
        options.format,
    )?;
    Ok(())
}

/// Executes `opgraph check`.
pub fn check(plan: &PlanConfig, scheme: &Path, grammar: GrammarKind) -> Result<()> {
    let lines = read_scheme_file(scheme)?;
    let compiler = SchemeCompiler::new(grammar.grammar(plan.operation_ids()));
    let report = compiler.validate(&lines);

    if !report.is_valid() {
        scheme_input::print_findings(&report);
        bail!("Scheme {} has errors", scheme.display());
    }

    let mut graph = OperationGraph::new();
    let compiled = compiler.materialize(&lines, &mut graph);
    output::print_check(&compiled, graph.count());
    graph.clear_graph();
    Ok(())
}
