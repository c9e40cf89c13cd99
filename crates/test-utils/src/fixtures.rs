//! Task fixtures shared by the integration tests.

use anyhow::anyhow;
use serde_json::Value;
use taskdag::task::{ActionFailure, Artifact, Inputs, Task};

/// A task that ignores its inputs and returns fixed artifacts.
pub fn constant_task(
    name: &str,
    consumes: &[&str],
    outputs: Vec<(&str, Value)>,
) -> Task {
    let provides: Vec<String> = outputs.iter().map(|(n, _)| n.to_string()).collect();
    let artifacts: Vec<Artifact> = outputs
        .into_iter()
        .map(|(n, v)| Artifact::new(n, v))
        .collect();

    Task::from_fn(name, move |_: &Inputs| Ok(artifacts.clone()))
        .consumes(consumes.iter().copied())
        .provides(provides)
}

/// A task whose action always fails, after producing `partial`.
pub fn failing_task(
    name: &str,
    consumes: &[&str],
    provides: &[&str],
    partial: Vec<(&str, Value)>,
) -> Task {
    let partial: Vec<Artifact> = partial
        .into_iter()
        .map(|(n, v)| Artifact::new(n, v))
        .collect();
    let task_name = name.to_string();

    Task::from_fn(name, move |_: &Inputs| {
        Err(ActionFailure::new(anyhow!("{task_name} blew up")).with_partial(partial.clone()))
    })
    .consumes(consumes.iter().copied())
    .provides(provides.iter().copied())
}

/// `t1 provides o1; t2 consumes o1 provides o2`
pub fn linear_graph() -> Vec<Task> {
    vec![
        constant_task("t1", &[], vec![("o1", Value::from("foobar"))]),
        constant_task("t2", &["o1"], vec![("o2", Value::from("foobar2"))]),
    ]
}

/// `t1 provides {o1, o2}; t2 consumes {o1, o2}`
pub fn diamond_graph() -> Vec<Task> {
    vec![
        constant_task(
            "t1",
            &[],
            vec![("o1", Value::from("foobar1")), ("o2", Value::from("foobar2"))],
        ),
        constant_task("t2", &["o1", "o2"], vec![]),
    ]
}
