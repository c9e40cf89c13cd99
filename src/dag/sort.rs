// src/dag/sort.rs

//! Kahn's algorithm over the task/artifact graph.
//!
//! The ready set starts with every node that has no incoming edge: root
//! tasks, plus artifacts no task provides (those can only come from the
//! initial seed). Nodes are removed from the ready set according to the
//! configured [`TieBreak`]; each removal deletes the node's outgoing edges and
//! promotes successors whose in-degree drops to zero.
//!
//! Whatever is left with a non-zero in-degree when the ready set empties is
//! stuck on a cycle (or downstream of one). Those nodes are reported in
//! [`TopoOrder::unresolved`], never silently dropped.

use std::collections::{BTreeSet, HashSet};

use petgraph::algo::tarjan_scc;
use tracing::{debug, warn};

use crate::dag::graph::DagGraph;
use crate::errors::{Result, TaskdagError};
use crate::task::Task;
use crate::types::TieBreak;

/// Output of a topological sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoOrder {
    /// Every schedulable node, tasks and artifacts interleaved.
    order: Vec<String>,
    /// `order` projected onto task names.
    task_order: Vec<String>,
    /// Nodes that never reached zero in-degree.
    unresolved: Vec<String>,
    /// `unresolved` projected onto task names.
    unresolved_tasks: Vec<String>,
    /// Strongly connected components (real cycles) among the unresolved nodes.
    cycles: Vec<Vec<String>>,
}

impl TopoOrder {
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn task_order(&self) -> &[String] {
        &self.task_order
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn unresolved_tasks(&self) -> &[String] {
        &self.unresolved_tasks
    }

    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// `true` if every node was placed in the order.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Turn a partial order into `TaskdagError::DagCycle`.
    pub fn into_result(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(self.cycle_error())
        }
    }

    pub(crate) fn cycle_error(&self) -> TaskdagError {
        TaskdagError::DagCycle {
            tasks: self.unresolved_tasks.clone(),
            cycles: self.cycles.clone(),
        }
    }
}

/// Ready set keyed by node index. The variant decides which ready node is
/// taken next.
enum ReadySet<'g> {
    Insertion(BTreeSet<usize>),
    Lexical(BTreeSet<(&'g str, usize)>),
    Arbitrary(HashSet<usize>),
}

impl<'g> ReadySet<'g> {
    fn new(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::Insertion => ReadySet::Insertion(BTreeSet::new()),
            TieBreak::Lexical => ReadySet::Lexical(BTreeSet::new()),
            TieBreak::Arbitrary => ReadySet::Arbitrary(HashSet::new()),
        }
    }

    fn insert(&mut self, name: &'g str, index: usize) {
        match self {
            ReadySet::Insertion(set) => {
                set.insert(index);
            }
            ReadySet::Lexical(set) => {
                set.insert((name, index));
            }
            ReadySet::Arbitrary(set) => {
                set.insert(index);
            }
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            ReadySet::Insertion(set) => set.pop_first(),
            ReadySet::Lexical(set) => set.pop_first().map(|(_, index)| index),
            ReadySet::Arbitrary(set) => {
                let index = *set.iter().next()?;
                set.remove(&index);
                Some(index)
            }
        }
    }
}

/// Topologically sort every node of `graph`.
pub fn sort(graph: &DagGraph, tie_break: TieBreak) -> TopoOrder {
    let mut in_degree: Vec<usize> = graph.nodes().map(|name| graph.in_degree(name)).collect();

    let mut ready = ReadySet::new(tie_break);
    for (index, name) in graph.nodes().enumerate() {
        if in_degree[index] == 0 {
            ready.insert(name, index);
        }
    }

    let mut order: Vec<String> = Vec::with_capacity(in_degree.len());

    while let Some(index) = ready.pop() {
        let name = graph.name_at(index);
        order.push(name.to_string());

        for succ in graph.successors_of(name) {
            let Some(succ_index) = graph.index_of(succ) else {
                continue;
            };
            in_degree[succ_index] -= 1;
            if in_degree[succ_index] == 0 {
                ready.insert(succ.as_str(), succ_index);
            }
        }
    }

    let unresolved: Vec<String> = graph
        .nodes()
        .enumerate()
        .filter(|(index, _)| in_degree[*index] > 0)
        .map(|(_, name)| name.to_string())
        .collect();

    let cycles = if unresolved.is_empty() {
        Vec::new()
    } else {
        find_cycles(graph, &unresolved)
    };

    let task_order = project_tasks(graph, &order);
    let unresolved_tasks = project_tasks(graph, &unresolved);

    if unresolved.is_empty() {
        debug!(?task_order, ?tie_break, "topological sort complete");
    } else {
        warn!(
            ?unresolved_tasks,
            ?cycles,
            "topological sort left nodes unresolved; dependency cycle present"
        );
    }

    TopoOrder {
        order,
        task_order,
        unresolved,
        unresolved_tasks,
        cycles,
    }
}

/// Build the graph for `tasks` and sort it.
///
/// This only fails on namespace collisions; a cyclic graph still yields a
/// (partial) [`TopoOrder`]. Chain [`TopoOrder::into_result`] to reject cycles.
pub fn topological_sort(tasks: &[Task], tie_break: TieBreak) -> Result<TopoOrder> {
    let graph = DagGraph::build(tasks)?;
    Ok(sort(&graph, tie_break))
}

fn project_tasks(graph: &DagGraph, names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| graph.is_task(name))
        .cloned()
        .collect()
}

/// Strongly connected components among the unresolved nodes.
///
/// Unresolved nodes that merely sit downstream of a cycle are not part of any
/// component and are left out. Members of each component are listed in
/// first-seen order, and components are ordered by their first member.
fn find_cycles(graph: &DagGraph, unresolved: &[String]) -> Vec<Vec<String>> {
    let keep: HashSet<&str> = unresolved.iter().map(|s| s.as_str()).collect();
    let sub = graph.induced_graph_map(|name| keep.contains(name));

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&sub)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|n| sub.contains_edge(*n, *n))
        })
        .map(|mut component| {
            component.sort_by_key(|name| graph.index_of(name).unwrap_or(usize::MAX));
            component.into_iter().map(str::to_string).collect()
        })
        .collect();

    cycles.sort_by_key(|component: &Vec<String>| {
        component
            .first()
            .and_then(|name| graph.index_of(name))
            .unwrap_or(usize::MAX)
    });

    cycles
}
