//! Terminal assertion nodes and the tree they form.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::Detail;
use crate::outcome::Outcome;
use crate::rule::Rule;

/// Pass/fail counts over a set of outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Number of outcomes counted.
    pub assertions: usize,
    /// Outcomes that passed.
    pub passed: usize,
    /// Outcomes that failed.
    pub failed: usize,
}

impl Tally {
    /// Counts a single outcome. `Pending` counts as a vacuous pass.
    pub fn of_outcome(outcome: &Outcome) -> Self {
        let failed = usize::from(outcome.is_failed());
        Self {
            assertions: 1,
            passed: 1 - failed,
            failed,
        }
    }

    /// Counts the direct outcomes of `records`, ignoring their descendants.
    pub fn of_children(records: &[Record]) -> Self {
        records
            .iter()
            .map(|record| Self::of_outcome(record.outcome()))
            .fold(Self::default(), Self::merge)
    }

    /// Adds two tallies together.
    pub fn merge(self, other: Self) -> Self {
        Self {
            assertions: self.assertions + other.assertions,
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
        }
    }
}

/// An assertion node together with its outcome and folded children.
///
/// Leaf checks produce records without children. Composite checks own the
/// records of every child they folded, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    description: String,
    outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<Rule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Record>,
}

impl Record {
    /// Creates a record that has not been evaluated yet.
    pub fn pending(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            outcome: Outcome::Pending,
            rule: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf record carrying the outcome of one check.
    pub fn leaf(description: impl Into<String>, outcome: Outcome) -> Self {
        Self::pending(description).settled(outcome)
    }

    /// A pending composite owning `children`, settled later by its rule.
    pub(crate) fn composite(description: String, rule: Rule, children: Vec<Record>) -> Self {
        Self {
            description,
            outcome: Outcome::Pending,
            rule: Some(rule),
            children,
        }
    }

    pub(crate) fn settled(mut self, outcome: Outcome) -> Self {
        if let Err(rejected) = self.settle(outcome) {
            warn!(
                description = %self.description,
                rejected = ?rejected,
                "record already settled; keeping its first outcome"
            );
        }
        self
    }

    /// Description of the node.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Outcome of the node. Reading it never re-runs the check.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Rule that folded the children, `None` for leaf checks.
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    /// Folded child records in execution order.
    pub fn children(&self) -> &[Record] {
        &self.children
    }

    /// Whether the record has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Settles a pending record; a terminal record keeps its first outcome.
    pub fn settle(&mut self, outcome: Outcome) -> Result<(), Outcome> {
        self.outcome.settle(outcome)
    }

    /// Closes the record: a pending record with no children passes vacuously.
    pub fn finalize(mut self) -> Self {
        if self.children.is_empty() {
            // A terminal outcome rejects the vacuous pass and stays as it was.
            let _ = self.settle(Outcome::Passed);
        }
        self
    }

    /// Counts the leaf records at or below this node.
    pub fn tally(&self) -> Tally {
        if self.children.is_empty() {
            return Tally::of_outcome(&self.outcome);
        }
        self.children
            .iter()
            .map(Record::tally)
            .fold(Tally::default(), Tally::merge)
    }

    /// Failure details in depth-first execution order.
    ///
    /// Leaf failures are listed as they occurred. A failed `none` composite
    /// lists its own detail, naming the children that held, ahead of them.
    pub fn failure_details(&self) -> Vec<&Detail> {
        let mut failures = Vec::new();
        self.collect_failure_details(&mut failures);
        failures
    }

    fn collect_failure_details<'a>(&'a self, out: &mut Vec<&'a Detail>) {
        let own = self.outcome.failure().map(|failure| &failure.detail);
        if self.children.is_empty() {
            out.extend(own);
            return;
        }
        if self.rule == Some(Rule::None) {
            out.extend(own);
        }
        for child in &self.children {
            child.collect_failure_details(out);
        }
    }
}
