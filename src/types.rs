// src/types.rs

use serde::Deserialize;

/// How the topological sorter picks among several nodes that are ready at
/// the same time.
///
/// Every policy produces a valid linearization; they only differ in which of
/// the valid orders comes out.
///
/// - `Insertion`: the node that was declared first (default).
/// - `Lexical`: the node with the smallest name.
/// - `Arbitrary`: whatever a hash set yields; may change from run to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    Insertion,
    Lexical,
    Arbitrary,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::Insertion
    }
}

/// What the executor does when some tasks cannot be scheduled because of a
/// dependency cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Refuse to run anything and return `TaskdagError::DagCycle`.
    Fail,
    /// Run every schedulable task and report the rest as excluded.
    Skip,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        CyclePolicy::Fail
    }
}
