#![allow(dead_code)]

use serde_json::Value;
use taskdag::config::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use taskdag::types::{CyclePolicy, TieBreak};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                artifacts: Default::default(),
                task: Default::default(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn with_artifact(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.config.artifacts.insert(name.to_string(), value.into());
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.config.tie_break = tie_break;
        self
    }

    pub fn on_cycle(mut self, policy: CyclePolicy) -> Self {
        self.config.config.on_cycle = policy;
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: cmd.to_string(),
                consumes: vec![],
                provides: vec![],
            },
        }
    }

    pub fn consumes(mut self, artifact: &str) -> Self {
        self.task.consumes.push(artifact.to_string());
        self
    }

    pub fn provides(mut self, artifact: &str) -> Self {
        self.task.provides.push(artifact.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
