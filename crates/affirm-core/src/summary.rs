//! Failure summaries built from terminal record trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Detail;
use crate::record::Record;

/// Aggregate view of a failed record tree.
///
/// Counts cover every leaf check executed below the failed node, including the
/// ones that passed, so `assertion_count == pass_count + failure_count` always
/// holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummary {
    /// Description of the node that failed.
    pub description: String,
    /// Leaf checks executed.
    pub assertion_count: usize,
    /// Leaf checks that passed.
    pub pass_count: usize,
    /// Leaf checks that failed.
    pub failure_count: usize,
    /// Failure details in execution order.
    pub failures: Vec<Detail>,
}

impl FailureSummary {
    /// Builds the summary by a depth-first walk over `record`.
    ///
    /// A failed record with no failure detail below it lists its own, so a
    /// failed summary is never empty.
    pub fn from_record(record: &Record) -> Self {
        let tally = record.tally();
        let mut failures: Vec<Detail> = record.failure_details().into_iter().cloned().collect();
        if failures.is_empty() {
            if let Some(failure) = record.outcome().failure() {
                failures.push(failure.detail.clone());
            }
        }
        Self {
            description: record.description().to_string(),
            assertion_count: tally.assertions,
            pass_count: tally.passed,
            failure_count: tally.failed,
            failures,
        }
    }

    /// Whether the counts add up.
    pub fn is_consistent(&self) -> bool {
        self.assertion_count == self.pass_count + self.failure_count
    }
}

impl fmt::Display for FailureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} assertions, {} passed, {} failed",
            self.description, self.assertion_count, self.pass_count, self.failure_count
        )?;
        for detail in &self.failures {
            write!(f, "\n  - {detail}")?;
        }
        Ok(())
    }
}
