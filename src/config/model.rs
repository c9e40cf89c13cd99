// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::exec::{CommandAction, ExecutorOptions};
use crate::task::{Artifact, Task};
use crate::types::{CyclePolicy, TieBreak};

/// Pipeline file exactly as deserialized, before validation.
///
/// ```toml
/// [config]
/// tie_break = "insertion"
/// on_cycle = "fail"
///
/// [artifacts]
/// region = "us-east-1"
///
/// [task.build]
/// cmd = "echo image=built-$REGION"
/// consumes = ["region"]
/// provides = ["image"]
/// ```
///
/// All sections are optional at parse time; validation requires at least one
/// task. Tables keep their document order, which is the order tasks are
/// declared to the scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Initial artifact values from `[artifacts]`.
    #[serde(default)]
    pub artifacts: IndexMap<String, Value>,

    /// All tasks from `[task.<name>]`.
    #[serde(default)]
    pub task: IndexMap<String, TaskConfig>,
}

/// Validated pipeline file. Build one with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub artifacts: IndexMap<String, Value>,
    pub task: IndexMap<String, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        artifacts: IndexMap<String, Value>,
        task: IndexMap<String, TaskConfig>,
    ) -> Self {
        Self {
            config,
            artifacts,
            task,
        }
    }

    /// Declared tasks, each backed by a [`CommandAction`].
    pub fn tasks(&self) -> Vec<Task> {
        build_tasks(&self.task)
    }

    /// Seed values from `[artifacts]`.
    pub fn initial_artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .iter()
            .map(|(name, value)| Artifact::new(name.clone(), value.clone()))
            .collect()
    }

    pub fn executor_options(&self) -> ExecutorOptions {
        ExecutorOptions {
            tie_break: self.config.tie_break,
            on_cycle: self.config.on_cycle,
        }
    }
}

pub(crate) fn build_tasks(tasks: &IndexMap<String, TaskConfig>) -> Vec<Task> {
    tasks
        .iter()
        .map(|(name, tc)| tc.to_task(name))
        .collect()
}

/// `[config]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConfigSection {
    /// `"insertion"` (default), `"lexical"` or `"arbitrary"`.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// `"fail"` (default): a cycle is a load/run error.
    /// `"skip"`: run what can run, report the rest as excluded.
    #[serde(default)]
    pub on_cycle: CyclePolicy,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Shell command to execute.
    pub cmd: String,

    /// Artifacts this task reads; exported to the command's environment.
    #[serde(default)]
    pub consumes: Vec<String>,

    /// Artifacts this task produces via `name=value` stdout lines.
    #[serde(default)]
    pub provides: Vec<String>,
}

impl TaskConfig {
    pub fn to_task(&self, name: &str) -> Task {
        let action = CommandAction::new(name, self.cmd.clone(), self.provides.clone());
        Task::new(name, action)
            .consumes(self.consumes.iter().cloned())
            .provides(self.provides.iter().cloned())
    }
}
