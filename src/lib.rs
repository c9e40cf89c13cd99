// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod task;
pub mod types;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::ConfigFile;
use crate::dag::{sort, DagGraph};
use crate::exec::{ExecutorOptions, RunReport, TaskExecutor};
use crate::task::Artifact;

pub use crate::dag::{topological_sort, TopoOrder};
pub use crate::errors::{Result as TaskdagResult, TaskdagError};
pub use crate::exec::{execute_tasks, ArtifactStore};
pub use crate::task::{Action, ActionFailure, ActionResult, Inputs, Task};
pub use crate::types::{CyclePolicy, TieBreak};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - CLI overrides (tie-break, artifact seeds)
/// - a single sequential run
/// - printing the final artifact store as JSON on stdout
///
/// Fails if any task failed or was excluded, so the process exit status
/// reflects the run.
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config;
    let cfg = load_and_validate(&config_path)?;

    let mut options = cfg.executor_options();
    if let Some(tie_break) = args.tie_break {
        options.tie_break = tie_break;
    }

    let tasks = cfg.tasks();

    if args.dry_run {
        print_dry_run(&cfg, options)?;
        return Ok(());
    }

    let initial = merge_seeds(cfg.initial_artifacts(), args.artifacts);
    info!(
        config = %config_path.display(),
        tasks = tasks.len(),
        seeded = initial.len(),
        "running pipeline"
    );

    let mut executor = TaskExecutor::new(options);
    let report = executor.execute(&tasks, initial)?;

    report.artifacts.log_artifacts();
    println!("{}", serde_json::to_string_pretty(&report.artifacts.to_json())?);

    summarize(&report)
}

/// CLI seeds override config seeds with the same name.
fn merge_seeds(from_config: Vec<Artifact>, from_cli: Vec<Artifact>) -> Vec<Artifact> {
    let mut seeds = ArtifactStore::seeded(from_config);
    seeds.merge(from_cli);
    seeds.into_artifacts()
}

fn summarize(report: &RunReport) -> Result<()> {
    let failed = report.failed_tasks();
    let excluded = report.excluded_tasks();

    if failed.is_empty() && excluded.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !failed.is_empty() {
        parts.push(format!("failed: {}", failed.join(", ")));
    }
    if !excluded.is_empty() {
        parts.push(format!("excluded by cycle: {}", excluded.join(", ")));
    }
    bail!("pipeline did not complete ({})", parts.join("; "))
}

/// Print tasks, their artifacts and the order they would run in.
fn print_dry_run(cfg: &ConfigFile, options: ExecutorOptions) -> Result<()> {
    println!("taskdag dry-run");
    println!("  config.tie_break = {:?}", options.tie_break);
    println!("  config.on_cycle = {:?}", options.on_cycle);
    println!();

    if !cfg.artifacts.is_empty() {
        println!("artifacts ({}):", cfg.artifacts.len());
        for (name, value) in cfg.artifacts.iter() {
            println!("  - {name} = {value}");
        }
        println!();
    }

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        println!("      cmd: {}", task.cmd);
        if !task.consumes.is_empty() {
            println!("      consumes: {:?}", task.consumes);
        }
        if !task.provides.is_empty() {
            println!("      provides: {:?}", task.provides);
        }
    }
    println!();

    let tasks = cfg.tasks();
    let graph = DagGraph::build(&tasks)?;
    let topo = sort(&graph, options.tie_break);

    println!("order:");
    for (i, name) in topo.task_order().iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    if !topo.is_complete() {
        println!("excluded by cycle: {:?}", topo.unresolved_tasks());
        for cycle in topo.cycles() {
            println!("  cycle: {}", cycle.join(" -> "));
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
