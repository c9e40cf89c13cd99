// src/exec/mod.rs

//! Task execution layer.
//!
//! - [`executor`] walks the task order and drives each action.
//! - [`store`] holds the artifacts produced so far.
//! - [`observer`] lets callers watch a run as structured events.
//! - [`report`] is what a run hands back.
//! - [`command`] provides the shell-command action used by config-defined
//!   tasks.

pub mod command;
pub mod executor;
pub mod observer;
pub mod report;
pub mod store;

pub use command::CommandAction;
pub use executor::{execute_tasks, ExecutorOptions, TaskExecutor};
pub use observer::{EventLog, NoopObserver, RunEvent, RunObserver};
pub use report::{RunReport, TaskOutcome, TaskRecord};
pub use store::ArtifactStore;
