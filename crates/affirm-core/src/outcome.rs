//! Outcome of a single check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Detail;

/// Family a failed outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A leaf predicate did not hold.
    CheckFailed,
    /// Structural misuse, e.g. asking a failed capture for its value.
    ExpectationViolated,
    /// Children folded into a result that broke the aggregation rule.
    AggregateFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckFailed => write!(f, "check failed"),
            Self::ExpectationViolated => write!(f, "expectation violated"),
            Self::AggregateFailed => write!(f, "aggregate failed"),
        }
    }
}

/// Failure recorded on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure family.
    pub kind: FailureKind,
    /// Description of what went wrong.
    pub detail: Detail,
}

impl Failure {
    /// A predicate that did not hold.
    pub fn check(detail: Detail) -> Self {
        Self {
            kind: FailureKind::CheckFailed,
            detail,
        }
    }

    /// A structural violation of the chain.
    pub fn violation(detail: Detail) -> Self {
        Self {
            kind: FailureKind::ExpectationViolated,
            detail,
        }
    }

    /// A fold that broke its aggregation rule.
    pub fn aggregate(detail: Detail) -> Self {
        Self {
            kind: FailureKind::AggregateFailed,
            detail,
        }
    }
}

/// Result of a check: not yet evaluated, passed, or failed.
///
/// Once an outcome is `Passed` or `Failed` it never changes again; see
/// [`Outcome::settle`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "failure", rename_all = "snake_case")]
pub enum Outcome {
    /// No check has been run yet.
    #[default]
    Pending,
    /// The check held.
    Passed,
    /// The check did not hold.
    Failed(Failure),
}

impl Outcome {
    /// Converts the verdict of a leaf predicate into an outcome.
    pub fn from_check(verdict: Result<(), Detail>) -> Self {
        match verdict {
            Ok(()) => Outcome::Passed,
            Err(detail) => Outcome::Failed(Failure::check(detail)),
        }
    }

    /// Whether no check has been run.
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    /// Whether the check held.
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    /// Whether the check did not hold.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Whether the outcome can no longer change.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Returns the failure when the outcome is `Failed`.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Moves a pending outcome to `next`.
    ///
    /// A terminal outcome is never overwritten: the rejected value is handed
    /// back and `self` keeps its first verdict.
    pub fn settle(&mut self, next: Outcome) -> Result<(), Outcome> {
        if self.is_terminal() {
            return Err(next);
        }
        *self = next;
        Ok(())
    }
}
