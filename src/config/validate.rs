// src/config/validate.rs

use crate::config::model::{build_tasks, ConfigFile, RawConfigFile};
use std::collections::HashMap;

use crate::dag::{sort, DagGraph};
use crate::exec::command::env_var_name;
use crate::errors::{Result, TaskdagError};
use crate::types::CyclePolicy;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.artifacts, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_commands(cfg)?;
    validate_task_io(cfg)?;
    validate_env_names(cfg)?;
    validate_seeds(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskdagError::ConfigError(
            "config must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.cmd.trim().is_empty() {
            return Err(TaskdagError::ConfigError(format!(
                "task '{}' has an empty `cmd`",
                name
            )));
        }
    }
    Ok(())
}

fn validate_task_io(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if let Some(artifact) = task.provides.iter().find(|a| task.consumes.contains(a)) {
            return Err(TaskdagError::ConfigError(format!(
                "task '{}' both consumes and provides '{}'",
                name, artifact
            )));
        }
    }
    Ok(())
}

/// Consumed artifacts are exported as environment variables; two names that
/// map to the same variable would shadow each other.
fn validate_env_names(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for artifact in task.consumes.iter() {
            let var = env_var_name(artifact);
            if let Some(previous) = seen.get(&var) {
                if *previous != artifact.as_str() {
                    return Err(TaskdagError::ConfigError(format!(
                        "task '{}' consumes '{}' and '{}', which both map to ${}",
                        name, previous, artifact, var
                    )));
                }
            }
            seen.insert(var, artifact.as_str());
        }
    }
    Ok(())
}

fn validate_seeds(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.artifacts.keys() {
        if cfg.task.contains_key(name) {
            return Err(TaskdagError::ConfigError(format!(
                "[artifacts].{} collides with task '{}'; task and artifact names share one namespace",
                name, name
            )));
        }
    }
    Ok(())
}

/// Build the graph (catches task/artifact name collisions) and, unless the
/// pipeline opts into skipping, reject cycles up front.
fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    let tasks = build_tasks(&cfg.task);
    let graph = DagGraph::build(&tasks)?;

    if cfg.config.on_cycle == CyclePolicy::Fail {
        sort(&graph, cfg.config.tie_break).into_result()?;
    }

    Ok(())
}
