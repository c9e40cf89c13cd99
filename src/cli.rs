// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::task::Artifact;
use crate::types::TieBreak;

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Run a pipeline of tasks in artifact-dependency order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Seed an artifact, overriding `[artifacts]`. Repeatable.
    ///
    /// VALUE is parsed as JSON when possible, otherwise used as a string.
    #[arg(long = "artifact", value_name = "NAME=VALUE", value_parser = Artifact::parse_assignment)]
    pub artifacts: Vec<Artifact>,

    /// Override `[config].tie_break`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub tie_break: Option<TieBreak>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the execution order, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
