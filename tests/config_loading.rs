// tests/config_loading.rs

mod common;
use crate::common::{init_tracing, TestResult};

use std::io::Write;

use serde_json::json;
use taskdag::config::{load_and_validate, parse_str, ConfigFile};
use taskdag::errors::TaskdagError;
use taskdag::types::{CyclePolicy, TieBreak};
use taskdag_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn full_pipeline_file_loads() -> TestResult {
    init_tracing();
    let file = write_config(
        r#"
[config]
tie_break = "lexical"
on_cycle = "skip"

[artifacts]
region = "us-east-1"
size = 8

[task.launch]
cmd = "echo instance=i-1"
consumes = ["region", "size"]
provides = ["instance"]

[task.tag]
cmd = "true"
consumes = ["instance"]
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.config.tie_break, TieBreak::Lexical);
    assert_eq!(cfg.config.on_cycle, CyclePolicy::Skip);
    assert_eq!(cfg.task.keys().collect::<Vec<_>>(), ["launch", "tag"]);

    let seeds = cfg.initial_artifacts();
    assert_eq!(seeds.len(), 2);
    assert_eq!(seeds[0].name, "region");
    assert_eq!(seeds[0].value, json!("us-east-1"));
    assert_eq!(seeds[1].value, json!(8));

    let tasks = cfg.tasks();
    assert_eq!(tasks[0].name(), "launch");
    assert_eq!(tasks[0].provided().collect::<Vec<_>>(), ["instance"]);
    Ok(())
}

#[test]
fn defaults_apply_when_sections_are_missing() -> TestResult {
    let raw = parse_str(
        r#"
[task.only]
cmd = "echo hi"
"#,
    )?;
    let cfg = ConfigFile::try_from(raw)?;

    assert_eq!(cfg.config.tie_break, TieBreak::Insertion);
    assert_eq!(cfg.config.on_cycle, CyclePolicy::Fail);
    assert!(cfg.artifacts.is_empty());
    Ok(())
}

#[test]
fn dag_cycle_returns_structured_error() {
    let file = write_config(
        r#"
[task.A]
cmd = "echo A"
consumes = ["b_out"]
provides = ["a_out"]

[task.B]
cmd = "echo B"
consumes = ["a_out"]
provides = ["b_out"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TaskdagError::DagCycle { tasks, cycles }) => {
            assert_eq!(tasks, ["A", "B"].map(String::from));
            assert_eq!(cycles.len(), 1);
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn cycle_is_accepted_when_policy_is_skip() {
    let cfg = ConfigFileBuilder::new()
        .on_cycle(CyclePolicy::Skip)
        .with_task(
            "A",
            TaskConfigBuilder::new("echo A").consumes("b").provides("a").build(),
        )
        .with_task(
            "B",
            TaskConfigBuilder::new("echo B").consumes("a").provides("b").build(),
        )
        .build();

    assert_eq!(cfg.task.len(), 2);
}

#[test]
fn empty_config_is_rejected() {
    let raw = ConfigFileBuilder::new().build_raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_command_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task("blank", TaskConfigBuilder::new("   ").build())
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("blank")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn task_consuming_its_own_output_is_rejected_even_when_skipping_cycles() {
    let raw = ConfigFileBuilder::new()
        .on_cycle(CyclePolicy::Skip)
        .with_task(
            "counter",
            TaskConfigBuilder::new("echo n=1").consumes("n").provides("n").build(),
        )
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => {
            assert!(msg.contains("counter"));
            assert!(msg.contains("'n'"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn consumed_names_sharing_an_env_var_are_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task(
            "merge",
            TaskConfigBuilder::new("echo out=$A_B")
                .consumes("a-b")
                .consumes("a_b")
                .provides("out")
                .build(),
        )
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => {
            assert!(msg.contains("a-b"));
            assert!(msg.contains("a_b"));
            assert!(msg.contains("$A_B"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn seed_colliding_with_task_name_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_artifact("build", "oops")
        .with_task("build", TaskConfigBuilder::new("make").build())
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("namespace")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn artifact_named_like_a_task_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task("build", TaskConfigBuilder::new("make").provides("deploy").build())
        .with_task("deploy", TaskConfigBuilder::new("ship").build())
        .build_raw();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(TaskdagError::DuplicateName { .. })
    ));
}

#[test]
fn invalid_tie_break_is_a_toml_error() {
    let result = parse_str(
        r#"
[config]
tie_break = "random"

[task.a]
cmd = "true"
"#,
    );

    assert!(matches!(result, Err(TaskdagError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/Taskdag.toml");
    assert!(matches!(result, Err(TaskdagError::IoError(_))));
}
