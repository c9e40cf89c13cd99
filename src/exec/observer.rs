// src/exec/observer.rs

//! Hooks into a run.
//!
//! The executor reports every task start (with the exact inputs handed to the
//! action) and every task outcome to a [`RunObserver`]. [`EventLog`] records
//! them as data, which is what tests assert on.

use crate::exec::report::TaskOutcome;
use crate::task::{Inputs, TaskName};

pub trait RunObserver {
    fn task_started(&mut self, _task: &str, _inputs: &Inputs) {}

    fn task_finished(&mut self, _task: &str, _outcome: &TaskOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

impl<O: RunObserver + ?Sized> RunObserver for &mut O {
    fn task_started(&mut self, task: &str, inputs: &Inputs) {
        (**self).task_started(task, inputs);
    }

    fn task_finished(&mut self, task: &str, outcome: &TaskOutcome) {
        (**self).task_finished(task, outcome);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    TaskStarted { task: TaskName, inputs: Inputs },
    TaskFinished { task: TaskName, outcome: TaskOutcome },
}

/// Records every event in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RunEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Task names in the order they were started.
    pub fn started(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RunEvent::TaskStarted { task, .. } => Some(task.as_str()),
                RunEvent::TaskFinished { .. } => None,
            })
            .collect()
    }

    /// Inputs the given task was started with (last start wins).
    pub fn inputs_of(&self, task: &str) -> Option<&Inputs> {
        self.events.iter().rev().find_map(|e| match e {
            RunEvent::TaskStarted { task: t, inputs } if t == task => Some(inputs),
            _ => None,
        })
    }

    pub fn outcome_of(&self, task: &str) -> Option<&TaskOutcome> {
        self.events.iter().rev().find_map(|e| match e {
            RunEvent::TaskFinished { task: t, outcome } if t == task => Some(outcome),
            _ => None,
        })
    }
}

impl RunObserver for EventLog {
    fn task_started(&mut self, task: &str, inputs: &Inputs) {
        self.events.push(RunEvent::TaskStarted {
            task: task.to_string(),
            inputs: inputs.clone(),
        });
    }

    fn task_finished(&mut self, task: &str, outcome: &TaskOutcome) {
        self.events.push(RunEvent::TaskFinished {
            task: task.to_string(),
            outcome: outcome.clone(),
        });
    }
}
