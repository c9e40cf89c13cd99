// src/exec/report.rs

//! Per-run results handed back to the caller.

use crate::exec::store::ArtifactStore;
use crate::task::TaskName;

/// Outcome of one task in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The action returned its artifacts.
    Succeeded,
    /// The action failed; `error` is the rendered error chain.
    Failed { error: String },
    /// The task was never run because a dependency cycle kept it from being
    /// scheduled.
    Excluded,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded)
    }
}

/// A task and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub task: TaskName,
    pub outcome: TaskOutcome,
}

/// Everything a run produced: the order used, per-task outcomes and the final
/// artifact store.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tasks in the order they ran.
    pub order: Vec<TaskName>,
    /// One record per task: executed tasks in run order, then excluded ones.
    pub outcomes: Vec<TaskRecord>,
    /// Cycles that excluded tasks (empty for an acyclic graph).
    pub cycles: Vec<Vec<String>>,
    /// Final artifact store.
    pub artifacts: ArtifactStore,
}

impl RunReport {
    pub fn outcome_of(&self, task: &str) -> Option<&TaskOutcome> {
        self.outcomes
            .iter()
            .find(|r| r.task == task)
            .map(|r| &r.outcome)
    }

    pub fn failed_tasks(&self) -> Vec<&str> {
        self.tasks_where(|o| matches!(o, TaskOutcome::Failed { .. }))
    }

    pub fn excluded_tasks(&self) -> Vec<&str> {
        self.tasks_where(|o| matches!(o, TaskOutcome::Excluded))
    }

    pub fn succeeded_tasks(&self) -> Vec<&str> {
        self.tasks_where(TaskOutcome::is_success)
    }

    /// `true` when every task ran and none failed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|r| r.outcome.is_success())
    }

    fn tasks_where(&self, pred: impl Fn(&TaskOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|r| pred(&r.outcome))
            .map(|r| r.task.as_str())
            .collect()
    }
}
