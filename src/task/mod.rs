// src/task/mod.rs

//! Task declarations: the contract between the scheduler and whoever
//! supplies work to it.
//!
//! - [`artifact`] holds the named values passed between tasks.
//! - [`action`] is the one-method capability a task runs.
//! - [`inputs`] is the read-only view of the artifact store an action gets.

pub mod action;
pub mod artifact;
pub mod inputs;

use std::fmt;

use indexmap::IndexSet;

pub use action::{Action, ActionFailure, ActionResult};
pub use artifact::Artifact;
pub use inputs::Inputs;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// A named unit of work.
///
/// `consumes` and `provides` are sets: repeated names collapse, and the
/// first-declaration order is kept so graph construction is reproducible.
pub struct Task {
    name: TaskName,
    consumes: IndexSet<String>,
    provides: IndexSet<String>,
    action: Box<dyn Action>,
}

impl Task {
    pub fn new(name: impl Into<TaskName>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            consumes: IndexSet::new(),
            provides: IndexSet::new(),
            action: Box::new(action),
        }
    }

    /// Build a task from a closure. The `Fn` bound here lets the compiler
    /// infer the closure's signature, which `new` cannot.
    pub fn from_fn<F>(name: impl Into<TaskName>, f: F) -> Self
    where
        F: Fn(&Inputs) -> ActionResult + 'static,
    {
        Self::new(name, f)
    }

    /// Declare artifacts this task reads.
    pub fn consumes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare artifacts this task produces.
    pub fn provides<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn consumed(&self) -> impl Iterator<Item = &str> {
        self.consumes.iter().map(|s| s.as_str())
    }

    pub fn provided(&self) -> impl Iterator<Item = &str> {
        self.provides.iter().map(|s| s.as_str())
    }

    pub fn does_provide(&self, artifact: &str) -> bool {
        self.provides.contains(artifact)
    }

    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("consumes", &self.consumes)
            .field("provides", &self.provides)
            .finish_non_exhaustive()
    }
}
