// src/exec/executor.rs

//! Sequential task executor.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::dag::{sort, DagGraph, NodeKind};
use crate::errors::{Result, TaskdagError};
use crate::exec::observer::{NoopObserver, RunObserver};
use crate::exec::report::{RunReport, TaskOutcome, TaskRecord};
use crate::exec::store::ArtifactStore;
use crate::task::{Artifact, Task};
use crate::types::{CyclePolicy, TieBreak};

/// Knobs for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub tie_break: TieBreak,
    pub on_cycle: CyclePolicy,
}

/// Runs tasks one at a time in dependency order.
///
/// Each run:
/// - builds the graph (rejecting duplicate names) and sorts it
/// - seeds a fresh [`ArtifactStore`] with the initial artifacts
/// - for each task: builds its inputs from the store, runs the action, merges
///   the returned artifacts
///
/// A failing action is logged and recorded but does not stop the run; any
/// partial artifacts it carried are merged like normal output.
#[derive(Debug)]
pub struct TaskExecutor<O: RunObserver = NoopObserver> {
    options: ExecutorOptions,
    observer: O,
}

impl TaskExecutor<NoopObserver> {
    pub fn new(options: ExecutorOptions) -> Self {
        Self::with_observer(options, NoopObserver)
    }
}

impl Default for TaskExecutor<NoopObserver> {
    fn default() -> Self {
        Self::new(ExecutorOptions::default())
    }
}

impl<O: RunObserver> TaskExecutor<O> {
    pub fn with_observer(options: ExecutorOptions, observer: O) -> Self {
        Self { options, observer }
    }

    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Execute `tasks`, starting from `initial` artifacts.
    ///
    /// Errors are configuration problems only: a duplicate name (including a
    /// seed named like a task), or a cycle under [`CyclePolicy::Fail`]. Task
    /// failures end up in the report.
    pub fn execute(&mut self, tasks: &[Task], initial: Vec<Artifact>) -> Result<RunReport> {
        let graph = DagGraph::build(tasks)?;
        check_seed_names(&graph, &initial)?;
        let topo = sort(&graph, self.options.tie_break);

        if !topo.is_complete() && self.options.on_cycle == CyclePolicy::Fail {
            return Err(topo.cycle_error());
        }

        let by_name: HashMap<&str, &Task> = tasks.iter().map(|t| (t.name(), t)).collect();
        let mut store = ArtifactStore::seeded(initial);
        let mut outcomes = Vec::with_capacity(tasks.len());

        info!(
            tasks = topo.task_order().len(),
            seeded = store.len(),
            "starting run"
        );

        for name in topo.task_order() {
            let Some(task) = by_name.get(name.as_str()) else {
                continue;
            };
            let outcome = self.execute_task(task, &mut store);
            outcomes.push(TaskRecord {
                task: name.clone(),
                outcome,
            });
        }

        for name in topo.unresolved_tasks() {
            warn!(task = %name, "task excluded by dependency cycle; not executed");
            self.observer.task_finished(name, &TaskOutcome::Excluded);
            outcomes.push(TaskRecord {
                task: name.clone(),
                outcome: TaskOutcome::Excluded,
            });
        }

        let report = RunReport {
            order: topo.task_order().to_vec(),
            outcomes,
            cycles: topo.cycles().to_vec(),
            artifacts: store,
        };

        info!(
            succeeded = report.succeeded_tasks().len(),
            failed = report.failed_tasks().len(),
            excluded = report.excluded_tasks().len(),
            artifacts = report.artifacts.len(),
            "run finished"
        );

        Ok(report)
    }

    /// Run a single task against the store.
    fn execute_task(&mut self, task: &Task, store: &mut ArtifactStore) -> TaskOutcome {
        info!(task = %task.name(), "executing task");

        let inputs = store.inputs_for(task);
        for (name, value) in inputs.iter() {
            if value.is_null() {
                debug!(task = %task.name(), artifact = %name, "consumed artifact has no value");
            }
        }

        self.observer.task_started(task.name(), &inputs);

        let (produced, outcome) = match task.action().run(&inputs) {
            Ok(artifacts) => (artifacts, TaskOutcome::Succeeded),
            Err(failure) => {
                let (error, partial) = failure.into_parts();
                let rendered = format!("{error:#}");
                warn!(
                    task = %task.name(),
                    error = %rendered,
                    partial = partial.len(),
                    "task action failed; continuing with remaining tasks"
                );
                (partial, TaskOutcome::Failed { error: rendered })
            }
        };

        for artifact in produced.iter() {
            if !task.does_provide(&artifact.name) {
                debug!(
                    task = %task.name(),
                    artifact = %artifact.name,
                    "task returned an artifact it does not declare"
                );
            }
        }
        for declared in task.provided() {
            if !produced.iter().any(|a| a.name == declared) {
                debug!(
                    task = %task.name(),
                    artifact = %declared,
                    "declared artifact was not returned"
                );
            }
        }

        store.merge(produced);
        self.observer.task_finished(task.name(), &outcome);

        outcome
    }
}

/// Seeds share the namespace with tasks, same as artifacts in the graph.
fn check_seed_names(graph: &DagGraph, initial: &[Artifact]) -> Result<()> {
    match initial.iter().find(|a| graph.is_task(&a.name)) {
        Some(seed) => Err(TaskdagError::DuplicateName {
            name: seed.name.clone(),
            first: NodeKind::Task,
            second: NodeKind::Artifact,
        }),
        None => Ok(()),
    }
}

/// Execute `tasks` with default options.
pub fn execute_tasks(tasks: &[Task], initial: Vec<Artifact>) -> Result<RunReport> {
    TaskExecutor::default().execute(tasks, initial)
}
