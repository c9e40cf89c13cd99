#![allow(dead_code)]

pub use taskdag_test_utils::fixtures::{constant_task, diamond_graph, failing_task, linear_graph};
pub use taskdag_test_utils::{assert_valid_linearization, init_tracing};

use std::error::Error;

pub type TestResult = Result<(), Box<dyn Error>>;
