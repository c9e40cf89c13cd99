// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::dag::NodeKind;

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Two nodes share a name. `first` and `second` describe the roles the
    /// name was claimed for, in declaration order.
    #[error("Duplicate name '{name}': already used as {first}, redeclared as {second}")]
    DuplicateName {
        name: String,
        first: NodeKind,
        second: NodeKind,
    },

    /// Tasks that could not be scheduled because they sit on, or behind, a
    /// dependency cycle.
    #[error("Cycle detected in DAG; unscheduled tasks: {}", .tasks.join(", "))]
    DagCycle {
        tasks: Vec<String>,
        cycles: Vec<Vec<String>>,
    },

    #[error("Artifact not available: {0}")]
    MissingArtifact(String),

    #[error("Artifact '{name}' is not a valid {expected}: {source}")]
    ArtifactType {
        name: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskdagError>;
