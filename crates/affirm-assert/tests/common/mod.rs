#![allow(dead_code)]

use affirm_assert::{AffirmError, FailureKind, FailureSummary};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber honouring `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn summary(err: &AffirmError) -> &FailureSummary {
    err.summary().expect("assertion failures carry a summary")
}

/// `(assertions, passed, failed)` of the summary carried by `err`.
pub fn counts(err: &AffirmError) -> (usize, usize, usize) {
    let summary = summary(err);
    assert!(summary.is_consistent());
    (
        summary.assertion_count,
        summary.pass_count,
        summary.failure_count,
    )
}

pub fn kind(err: &AffirmError) -> FailureKind {
    err.kind().expect("assertion failures carry a kind")
}
