// src/task/action.rs

//! The capability a task runs.
//!
//! Anything callable as `Fn(&Inputs) -> ActionResult` is an [`Action`], so
//! most tasks are declared with a closure. Types that wrap their own I/O
//! (e.g. [`crate::exec::CommandAction`]) implement the trait directly.

use std::fmt;

use crate::task::{Artifact, Inputs};

/// Result of running an action: the produced artifacts, or a failure.
pub type ActionResult = std::result::Result<Vec<Artifact>, ActionFailure>;

/// Trait abstracting a task's work.
///
/// The executor calls `run` exactly once per scheduled task, synchronously.
pub trait Action {
    fn run(&self, inputs: &Inputs) -> ActionResult;
}

impl<F> Action for F
where
    F: Fn(&Inputs) -> ActionResult,
{
    fn run(&self, inputs: &Inputs) -> ActionResult {
        self(inputs)
    }
}

/// An action error, plus whatever artifacts the action managed to produce
/// before failing. The executor still merges those.
pub struct ActionFailure {
    error: anyhow::Error,
    partial: Vec<Artifact>,
}

impl ActionFailure {
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            partial: Vec::new(),
        }
    }

    pub fn with_partial(mut self, artifacts: Vec<Artifact>) -> Self {
        self.partial = artifacts;
        self
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn partial(&self) -> &[Artifact] {
        &self.partial
    }

    pub fn into_parts(self) -> (anyhow::Error, Vec<Artifact>) {
        (self.error, self.partial)
    }
}

// Lets actions use `?` on anything anyhow can absorb.
impl<E> From<E> for ActionFailure
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(err)
    }
}

impl fmt::Debug for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionFailure")
            .field("error", &self.error)
            .field("partial", &self.partial)
            .finish()
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)
    }
}
