// tests/topological_sort.rs

mod common;
use crate::common::{
    assert_valid_linearization, constant_task, diamond_graph, init_tracing, linear_graph,
    TestResult,
};

use serde_json::Value;
use taskdag::dag::{sort, topological_sort, DagGraph};
use taskdag::errors::TaskdagError;
use taskdag::task::Task;
use taskdag::types::TieBreak;

const ALL_POLICIES: [TieBreak; 3] = [TieBreak::Insertion, TieBreak::Lexical, TieBreak::Arbitrary];

/// Three independent roots feeding one sink:
/// a, b, c each provide one artifact; sink consumes all three.
fn fan_in() -> Vec<Task> {
    vec![
        constant_task("c", &[], vec![("oc", Value::Null)]),
        constant_task("a", &[], vec![("oa", Value::Null)]),
        constant_task("b", &[], vec![("ob", Value::Null)]),
        constant_task("sink", &["oa", "ob", "oc"], vec![]),
    ]
}

#[test]
fn diamond_node_order() -> TestResult {
    init_tracing();
    for policy in ALL_POLICIES {
        let topo = topological_sort(&diamond_graph(), policy)?;

        assert_eq!(topo.order().len(), 4);
        assert_eq!(topo.order()[0], "t1");
        assert_eq!(topo.order()[3], "t2");
        assert_eq!(topo.task_order(), ["t1".to_string(), "t2".to_string()]);
        assert!(topo.is_complete());
    }
    Ok(())
}

#[test]
fn linear_chain_task_order() -> TestResult {
    for policy in ALL_POLICIES {
        let topo = topological_sort(&linear_graph(), policy)?;
        assert_eq!(topo.task_order(), ["t1".to_string(), "t2".to_string()]);
        assert_eq!(topo.order(), ["t1", "o1", "t2", "o2"].map(String::from));
    }
    Ok(())
}

#[test]
fn insertion_tie_break_follows_declaration_order() -> TestResult {
    let topo = topological_sort(&fan_in(), TieBreak::Insertion)?;
    assert_eq!(
        topo.task_order(),
        ["c", "a", "b", "sink"].map(String::from)
    );
    Ok(())
}

#[test]
fn lexical_tie_break_follows_names() -> TestResult {
    let topo = topological_sort(&fan_in(), TieBreak::Lexical)?;
    assert_eq!(
        topo.task_order(),
        ["a", "b", "c", "sink"].map(String::from)
    );
    Ok(())
}

#[test]
fn arbitrary_tie_break_is_always_a_valid_linearization() -> TestResult {
    let tasks = fan_in();
    let graph = DagGraph::build(&tasks)?;

    for _ in 0..20 {
        let topo = sort(&graph, TieBreak::Arbitrary);
        assert!(topo.is_complete());
        assert_eq!(topo.order().len(), graph.node_count());
        assert_valid_linearization(&graph, topo.order());
        assert_eq!(topo.task_order().last().map(String::as_str), Some("sink"));
    }
    Ok(())
}

#[test]
fn unproduced_artifact_does_not_block_its_consumer() -> TestResult {
    // `region` is provided by no task; it can only come from the seed.
    let tasks = vec![
        constant_task("launch", &["region"], vec![("instance", Value::Null)]),
        constant_task("report", &["instance"], vec![]),
    ];
    let topo = topological_sort(&tasks, TieBreak::Insertion)?;

    assert!(topo.is_complete());
    assert_eq!(topo.task_order(), ["launch", "report"].map(String::from));
    assert_eq!(topo.order()[0], "region");
    Ok(())
}

#[test]
fn cycle_is_reported_not_dropped() -> TestResult {
    init_tracing();
    // ok runs; x and y feed each other; z only waits on y.
    let tasks = vec![
        constant_task("ok", &[], vec![("o_ok", Value::Null)]),
        constant_task("x", &["o_y"], vec![("o_x", Value::Null)]),
        constant_task("y", &["o_x"], vec![("o_y", Value::Null)]),
        constant_task("z", &["o_y"], vec![]),
    ];
    let topo = topological_sort(&tasks, TieBreak::Insertion)?;

    assert!(!topo.is_complete());
    assert_eq!(topo.task_order(), ["ok".to_string()]);
    assert_eq!(topo.unresolved_tasks(), ["x", "y", "z"].map(String::from));
    assert_eq!(topo.cycles().len(), 1);
    assert_eq!(topo.cycles()[0], ["x", "y", "o_x", "o_y"].map(String::from));

    match topo.into_result() {
        Err(TaskdagError::DagCycle { tasks, cycles }) => {
            assert_eq!(tasks, ["x", "y", "z"].map(String::from));
            assert_eq!(cycles.len(), 1);
        }
        other => panic!("Expected DagCycle error, got: {:?}", other),
    }
    Ok(())
}

#[test]
fn task_consuming_its_own_output_is_a_cycle() -> TestResult {
    let tasks = vec![constant_task("loop", &["state"], vec![("state", Value::Null)])];
    let topo = topological_sort(&tasks, TieBreak::Insertion)?;

    assert_eq!(topo.unresolved_tasks(), ["loop".to_string()]);
    assert_eq!(topo.cycles(), [vec!["loop".to_string(), "state".to_string()]]);
    Ok(())
}
