//! Structured error types surfaced by failed assertion chains.

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outcome::FailureKind;
use crate::summary::FailureSummary;

/// What a failed check saw, keyed by the check that produced it.
///
/// Rendered as `[code] message` followed by `; key: value` pairs and an
/// optional `; hint: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    /// Name of the check, e.g. `is-equal-to` or a rule code like `all`.
    pub code: String,
    /// What went wrong, in one sentence.
    pub message: String,
    /// Observed values such as `expected`, `actual` or a captured `error`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggestion printed after the context, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Detail {
    /// A detail with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Attaches an observed value under `key`, replacing an earlier one.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the expected value using its debug representation.
    pub fn expected(self, value: &(impl Debug + ?Sized)) -> Self {
        self.with_context("expected", format!("{value:?}"))
    }

    /// Records the actual value using its debug representation.
    pub fn actual(self, value: &(impl Debug + ?Sized)) -> Self {
        self.with_context("actual", format!("{value:?}"))
    }

    /// Adds a suggestion shown after the observed values.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for (key, value) in &self.context {
            write!(f, "; {key}: {value}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Error surfaced to the caller when a root assertion does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AffirmError {
    /// A leaf predicate did not hold.
    #[error("check failed: {0}")]
    CheckFailed(FailureSummary),
    /// The chain was used against a subject of the wrong shape.
    #[error("expectation violated: {0}")]
    ExpectationViolated(FailureSummary),
    /// A composition block did not satisfy its aggregation rule.
    #[error("aggregate failed: {0}")]
    AggregateFailed(FailureSummary),
    /// Policy loading or parsing failed.
    #[error("config error: {0}")]
    Config(Detail),
}

impl AffirmError {
    /// Wraps a summary in the error family matching `kind`.
    pub fn from_summary(kind: FailureKind, summary: FailureSummary) -> Self {
        match kind {
            FailureKind::CheckFailed => AffirmError::CheckFailed(summary),
            FailureKind::ExpectationViolated => AffirmError::ExpectationViolated(summary),
            FailureKind::AggregateFailed => AffirmError::AggregateFailed(summary),
        }
    }

    /// Returns the failure summary carried by assertion failures.
    pub fn summary(&self) -> Option<&FailureSummary> {
        match self {
            AffirmError::CheckFailed(summary)
            | AffirmError::ExpectationViolated(summary)
            | AffirmError::AggregateFailed(summary) => Some(summary),
            AffirmError::Config(_) => None,
        }
    }

    /// Returns the failure family, `None` for configuration errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            AffirmError::CheckFailed(_) => Some(FailureKind::CheckFailed),
            AffirmError::ExpectationViolated(_) => Some(FailureKind::ExpectationViolated),
            AffirmError::AggregateFailed(_) => Some(FailureKind::AggregateFailed),
            AffirmError::Config(_) => None,
        }
    }
}
