// tests/cli_run.rs
//
// Drives `taskdag::run` the way `main` does. Tasks write to files in a temp
// dir so the effects of CLI overrides can be checked after the run.
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, TestResult};

use std::fs;
use std::path::Path;

use serde_json::json;
use taskdag::cli::CliArgs;
use taskdag::task::Artifact;
use taskdag::types::TieBreak;
use tempfile::TempDir;

fn write_pipeline(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("Taskdag.toml");
    fs::write(&path, contents).expect("write pipeline");
    path
}

fn args_for(config: std::path::PathBuf) -> CliArgs {
    CliArgs {
        config,
        artifacts: vec![],
        tie_break: None,
        log_level: None,
        dry_run: false,
    }
}

#[test]
fn cli_seed_overrides_config_seed() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let out = dir.path().join("who.txt");
    let config = write_pipeline(
        dir.path(),
        &format!(
            r#"
[artifacts]
who = "config"

[task.greet]
cmd = "printf %s \"$WHO\" > {}"
consumes = ["who"]
"#,
            out.display()
        ),
    );

    let mut args = args_for(config);
    args.artifacts = vec![Artifact::new("who", json!("cli"))];

    taskdag::run(args)?;

    assert_eq!(fs::read_to_string(&out)?, "cli");
    Ok(())
}

#[test]
fn tie_break_flag_overrides_config() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let out = dir.path().join("order.txt");
    let config = write_pipeline(
        dir.path(),
        &format!(
            r#"
[config]
tie_break = "insertion"

[task.zeta]
cmd = "echo zeta >> {out}"

[task.alpha]
cmd = "echo alpha >> {out}"
"#,
            out = out.display()
        ),
    );

    taskdag::run(args_for(config.clone()))?;
    assert_eq!(fs::read_to_string(&out)?, "zeta\nalpha\n");

    fs::remove_file(&out)?;
    let mut args = args_for(config);
    args.tie_break = Some(TieBreak::Lexical);
    taskdag::run(args)?;
    assert_eq!(fs::read_to_string(&out)?, "alpha\nzeta\n");
    Ok(())
}

#[test]
fn failed_task_makes_run_fail() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let out = dir.path().join("after.txt");
    let config = write_pipeline(
        dir.path(),
        &format!(
            r#"
[task.broken]
cmd = "exit 2"

[task.after]
cmd = "touch {}"
"#,
            out.display()
        ),
    );

    let err = taskdag::run(args_for(config)).expect_err("broken task should fail the run");

    assert!(err.to_string().contains("failed: broken"), "got: {err}");
    assert!(out.exists(), "remaining tasks still run");
    Ok(())
}

#[test]
fn excluded_task_makes_run_fail() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let config = write_pipeline(
        dir.path(),
        r#"
[config]
on_cycle = "skip"

[task.a]
cmd = "echo a_out=1"
consumes = ["b_out"]
provides = ["a_out"]

[task.b]
cmd = "echo b_out=1"
consumes = ["a_out"]
provides = ["b_out"]
"#,
    );

    let err = taskdag::run(args_for(config)).expect_err("cycle should fail the run");

    assert!(err.to_string().contains("excluded by cycle: a, b"), "got: {err}");
    Ok(())
}

#[test]
fn dry_run_executes_nothing() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let out = dir.path().join("ran.txt");
    let config = write_pipeline(
        dir.path(),
        &format!(
            r#"
[task.only]
cmd = "touch {}"
"#,
            out.display()
        ),
    );

    let mut args = args_for(config);
    args.dry_run = true;
    taskdag::run(args)?;

    assert!(!out.exists());
    Ok(())
}
