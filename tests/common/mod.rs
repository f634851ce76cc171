//! Common test utilities for pipeline tests.

use typelower::{TransformConfig, TransformOutput, transform_file};
use typelower_syntax::{NoOracle, NodeRef, TypeOracle, print};

/// Route pipeline logs to the test harness. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Run the default pipeline and return the transformed file.
#[allow(dead_code)]
pub fn run_with(file: &NodeRef, oracle: &dyn TypeOracle) -> TransformOutput {
    init_tracing();
    transform_file(file, oracle, &TransformConfig::default()).expect("transformation failed")
}

/// Run the default pipeline without an oracle and print the result.
#[allow(dead_code)]
pub fn lower(file: &NodeRef) -> String {
    print(&run_with(file, &NoOracle).file)
}
