// src/dag/graph.rs

use std::fmt;

use indexmap::IndexMap;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::task::Task;

/// What a node in the graph stands for. Task and artifact names share one
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Task,
    Artifact,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Task => write!(f, "task"),
            NodeKind::Artifact => write!(f, "artifact"),
        }
    }
}

/// Internal node structure: stores immediate successors and predecessors.
#[derive(Debug, Clone)]
struct DagNode {
    kind: NodeKind,
    /// Edge targets: provided artifacts for a task, consumers for an artifact.
    successors: Vec<String>,
    /// Edge sources: the consumed artifacts of a task, producers of an artifact.
    predecessors: Vec<String>,
}

impl DagNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }
}

/// Directed graph over task and artifact names.
///
/// Edges run task → each artifact it provides, and artifact → each task that
/// consumes it. Nodes keep their first-seen order: all tasks in declaration
/// order, then artifacts in the order tasks reference them.
///
/// The graph may contain cycles; the sorter reports them.
#[derive(Debug, Clone, Default)]
pub struct DagGraph {
    nodes: IndexMap<String, DagNode>,
    edge_count: usize,
}

impl DagGraph {
    /// Build the graph for the given tasks.
    ///
    /// Fails with `DuplicateName` when two tasks share a name, or when a task
    /// name is also used as an artifact name.
    pub fn build(tasks: &[Task]) -> Result<Self> {
        let mut graph = DagGraph::default();

        // First pass: every task is a node, even one with no edges.
        for task in tasks {
            graph.register(task.name(), NodeKind::Task)?;
        }

        // Second pass: artifacts and edges.
        for task in tasks {
            for artifact in task.provided() {
                graph.register(artifact, NodeKind::Artifact)?;
                graph.add_edge(task.name(), artifact);
            }
            for artifact in task.consumed() {
                graph.register(artifact, NodeKind::Artifact)?;
                graph.add_edge(artifact, task.name());
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count,
            "built task/artifact graph"
        );

        Ok(graph)
    }

    fn register(&mut self, name: &str, kind: NodeKind) -> Result<()> {
        match self.nodes.get(name) {
            None => {
                self.nodes.insert(name.to_string(), DagNode::new(kind));
                Ok(())
            }
            // Artifacts are referenced many times; that's fine.
            Some(node) if node.kind == NodeKind::Artifact && kind == NodeKind::Artifact => Ok(()),
            Some(node) => Err(TaskdagError::DuplicateName {
                name: name.to_string(),
                first: node.kind,
                second: kind,
            }),
        }
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        if let Some(node) = self.nodes.get_mut(from) {
            node.successors.push(to.to_string());
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.predecessors.push(from.to_string());
        }
        self.edge_count += 1;
    }

    /// Adjacency map: node name → successor names.
    ///
    /// Only nodes with at least one outgoing edge appear as keys; a node
    /// without successors is still reachable as some other node's target, or
    /// through [`DagGraph::nodes`].
    pub fn adjacency(&self) -> IndexMap<&str, &[String]> {
        self.nodes
            .iter()
            .filter(|(_, node)| !node.successors.is_empty())
            .map(|(name, node)| (name.as_str(), node.successors.as_slice()))
            .collect()
    }

    /// All node names in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes_of_kind(NodeKind::Task)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.nodes_of_kind(NodeKind::Artifact)
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.kind == kind)
            .map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<NodeKind> {
        self.nodes.get(name).map(|n| n.kind)
    }

    pub fn is_task(&self, name: &str) -> bool {
        self.kind_of(name) == Some(NodeKind::Task)
    }

    pub fn successors_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.successors.as_slice())
            .unwrap_or(&[])
    }

    pub fn predecessors_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.predecessors.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks that provide `artifact`.
    pub fn producers_of(&self, artifact: &str) -> &[String] {
        match self.kind_of(artifact) {
            Some(NodeKind::Artifact) => self.predecessors_of(artifact),
            _ => &[],
        }
    }

    /// Tasks that consume `artifact`.
    pub fn consumers_of(&self, artifact: &str) -> &[String] {
        match self.kind_of(artifact) {
            Some(NodeKind::Artifact) => self.successors_of(artifact),
            _ => &[],
        }
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.predecessors_of(name).len()
    }

    pub fn has_incoming_edges(&self, name: &str) -> bool {
        self.in_degree(name) > 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Position of `name` in first-seen order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        self.nodes
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    /// A petgraph view of the subgraph induced by `keep`, for algorithms we
    /// don't implement ourselves (e.g. strongly connected components).
    pub(crate) fn induced_graph_map<'a>(
        &'a self,
        keep: impl Fn(&str) -> bool,
    ) -> DiGraphMap<&'a str, ()> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for (name, node) in self.nodes.iter() {
            if !keep(name) {
                continue;
            }
            graph.add_node(name.as_str());
            for succ in node.successors.iter() {
                if keep(succ) {
                    graph.add_edge(name.as_str(), succ.as_str(), ());
                }
            }
        }

        graph
    }
}
