//! Aggregation rules folding child outcomes into a parent outcome.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Detail;
use crate::outcome::{Failure, Outcome};
use crate::record::{Record, Tally};

/// Policy deciding whether a composite passes given its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Every child must pass. Zero children pass vacuously.
    All,
    /// At least one child must pass. Zero children fail.
    Any,
    /// No child may pass. Zero children pass vacuously.
    None,
}

impl Rule {
    /// Stable code used in failure details.
    pub fn code(self) -> &'static str {
        match self {
            Rule::All => "all",
            Rule::Any => "any",
            Rule::None => "none",
        }
    }

    /// Whether a composite whose direct children produced `tally` passes.
    pub fn holds(self, tally: Tally) -> bool {
        match self {
            Rule::All => tally.failed == 0,
            Rule::Any => tally.passed > 0,
            Rule::None => tally.passed == 0,
        }
    }

    /// Folds `children` into a settled composite record.
    pub fn fold(self, description: impl Into<String>, children: Vec<Record>) -> Record {
        let description = description.into();
        let children: Vec<Record> = children.into_iter().map(Record::finalize).collect();
        let tally = Tally::of_children(&children);
        let outcome = if self.holds(tally) {
            Outcome::Passed
        } else {
            Outcome::Failed(Failure::aggregate(self.violation(tally, &children)))
        };
        debug!(
            rule = %self,
            description = %description,
            children = tally.assertions,
            passed = tally.passed,
            failed = tally.failed,
            holds = outcome.is_passed(),
            "folded composition"
        );
        Record::composite(description, self, children).settled(outcome)
    }

    fn violation(self, tally: Tally, children: &[Record]) -> Detail {
        let message = match self {
            Rule::All => format!(
                "{} of {} children did not hold",
                tally.failed, tally.assertions
            ),
            Rule::Any if tally.assertions == 0 => "no children were checked".to_string(),
            Rule::Any => format!("none of the {} children held", tally.assertions),
            Rule::None => format!(
                "{} of {} children held but none were expected to",
                tally.passed, tally.assertions
            ),
        };
        let detail = Detail::new(self.code(), message)
            .with_context("children", tally.assertions.to_string())
            .with_context("passed", tally.passed.to_string())
            .with_context("failed", tally.failed.to_string());
        if self != Rule::None {
            return detail;
        }
        let held: Vec<&str> = children
            .iter()
            .filter(|child| child.outcome().is_passed())
            .map(Record::description)
            .collect();
        detail.with_context("held", held.join(", "))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
