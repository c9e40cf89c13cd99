pub mod builders;
pub mod fixtures;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use taskdag::dag::DagGraph;
use taskdag::logging::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Reads the same variable as the binary, e.g.:
/// `TASKDAG_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Panic unless every edge of `graph` whose endpoints both appear in `order`
/// runs forward, and every name in `order` appears once.
pub fn assert_valid_linearization(graph: &DagGraph, order: &[String]) {
    let position = |name: &str| order.iter().position(|n| n == name);

    for (i, name) in order.iter().enumerate() {
        assert_eq!(
            position(name.as_str()),
            Some(i),
            "node '{name}' appears more than once in {order:?}"
        );
    }

    for (from, succs) in graph.adjacency() {
        for to in succs {
            if let (Some(a), Some(b)) = (position(from), position(to.as_str())) {
                assert!(
                    a < b,
                    "edge {from} -> {to} runs backwards in {order:?}"
                );
            }
        }
    }
}
