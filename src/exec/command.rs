// src/exec/command.rs

//! Shell-command action used by config-defined tasks.

use std::process::{Command, Stdio};

use anyhow::{anyhow, Context};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::task::artifact::parse_loose_value;
use crate::task::{Action, ActionFailure, ActionResult, Artifact, Inputs};

/// Runs a shell command as a task action.
///
/// - Each consumed artifact is exported as an environment variable named
///   after it (see [`env_var_name`]). Strings are passed raw; other values as
///   JSON; missing values as an empty string.
/// - Each stdout line of the form `name=value`, where `name` is one of the
///   artifacts this task provides, becomes an artifact. The value is parsed
///   as JSON, falling back to a plain string. The last line for a name wins.
/// - A non-zero exit is a failure that still carries the parsed artifacts.
#[derive(Debug, Clone)]
pub struct CommandAction {
    task: String,
    cmd: String,
    provides: Vec<String>,
}

impl CommandAction {
    pub fn new(task: impl Into<String>, cmd: impl Into<String>, provides: Vec<String>) -> Self {
        Self {
            task: task.into(),
            cmd: cmd.into(),
            provides,
        }
    }

    fn shell_command(&self) -> Command {
        if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        }
    }
}

impl Action for CommandAction {
    fn run(&self, inputs: &Inputs) -> ActionResult {
        info!(task = %self.task, cmd = %self.cmd, "starting task process");

        let mut cmd = self.shell_command();
        let mut exported: IndexMap<String, &str> = IndexMap::new();
        for (name, value) in inputs.iter() {
            let var = env_var_name(name);
            if let Some(previous) = exported.insert(var.clone(), name) {
                warn!(
                    task = %self.task,
                    env = %var,
                    shadowed = %previous,
                    artifact = %name,
                    "two consumed artifacts map to the same environment variable"
                );
            }
            cmd.env(var, env_value(value));
        }

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("spawning process for task '{}'", self.task))?;

        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(task = %self.task, "stderr: {}", line);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let artifacts = parse_outputs(&self.task, &stdout, &self.provides);

        let code = output.status.code().unwrap_or(-1);
        info!(
            task = %self.task,
            exit_code = code,
            success = output.status.success(),
            artifacts = artifacts.len(),
            "task process exited"
        );

        if output.status.success() {
            Ok(artifacts)
        } else {
            Err(ActionFailure::new(anyhow!(
                "command for task '{}' exited with code {}",
                self.task,
                code
            ))
            .with_partial(artifacts))
        }
    }
}

/// Environment variable an artifact is exported under: uppercased, with
/// every character outside `[A-Z0-9_]` replaced by `_`.
pub fn env_var_name(artifact: &str) -> String {
    artifact
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn env_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pick `name=value` lines for declared artifacts out of `stdout`.
pub fn parse_outputs(task: &str, stdout: &str, provides: &[String]) -> Vec<Artifact> {
    let mut found: IndexMap<&str, Value> = IndexMap::new();

    for line in stdout.lines() {
        match line.split_once('=') {
            Some((name, raw)) if provides.iter().any(|p| p == name.trim()) => {
                found.insert(name.trim(), parse_loose_value(raw));
            }
            _ => debug!(task = %task, "stdout: {}", line),
        }
    }

    found
        .into_iter()
        .map(|(name, value)| Artifact::new(name, value))
        .collect()
}
