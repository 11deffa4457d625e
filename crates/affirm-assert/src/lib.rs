#![deny(missing_docs)]
#![doc = "Typed assertion chains with narrowing, aggregated composition blocks and captured actions."]

/// Captured action results and the checks that unwrap them.
pub mod catching;
/// Composition scopes and the `nested`/`all`/`any`/`none` blocks.
pub mod compose;
/// Runtime type narrowing primitives.
pub mod narrow;
/// Assertion nodes and the recorders they report to.
pub mod node;
/// Rendering policy configuration.
pub mod policies;
/// Leaf predicate registry grouped by subject capability.
pub mod predicates;
/// Conversion of record trees into errors and rendered reports.
pub mod reporter;

pub use catching::{expect_catching, expect_catching_panic, Capture, Captured, CaughtError, Panicked};
pub use compose::Collector;
pub use narrow::Narrow;
pub use node::{expect, Assertion, Recorder, Root};
pub use policies::Policy;
pub use predicates::{predicate, Collection, Predicate};
pub use reporter::{report, ReportSink, Reporter, TracingSink};

pub use affirm_core::{AffirmError, Detail, FailureKind, FailureSummary, Outcome, Record, Rule};
