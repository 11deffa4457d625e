use affirm_core::{Record, Rule};
use tracing::trace;

use crate::catching::{CaughtError, Captured};
use crate::node::{Assertion, Recorder};

/// Scope of one composition block.
///
/// Every check run on a node created from the collector pushes its record
/// here; the enclosing block folds the records once the block returns.
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<Record>,
}

impl Collector {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child node over `subject` that records into this scope.
    pub fn expect<T>(&mut self, subject: T) -> Assertion<T, &mut Collector> {
        Assertion::new(subject, self)
    }

    /// Runs `op` once and creates a child node over its captured result.
    pub fn expect_catching<T, E, F>(&mut self, op: F) -> Assertion<Captured<T>, &mut Collector>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<CaughtError>,
    {
        Assertion::new(Captured::capture(op), self).described_as("action")
    }

    /// Records collected so far, in execution order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records collected.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no check has recorded into the scope yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Closes the scope, folding its records with `rule`.
    pub fn fold(self, description: impl Into<String>, rule: Rule) -> Record {
        rule.fold(description, self.records)
    }

    fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl<'s> Recorder for &'s mut Collector {
    type Step<T> = Assertion<T, &'s mut Collector>;

    fn settle<T>(node: Assertion<T, Self>, record: Record) -> Self::Step<T> {
        node.recorder.push(record);
        node
    }

    fn proceed<T>(node: Assertion<T, Self>) -> Self::Step<T> {
        node
    }
}

impl<T, R: Recorder> Assertion<T, R> {
    /// Runs `block` in a fresh scope and settles this node with the fold of
    /// everything the block recorded.
    ///
    /// The block always runs to completion; sibling checks inside it are never
    /// cut short by an earlier failure.
    pub fn nested<F>(self, description: impl Into<String>, rule: Rule, block: F) -> R::Step<T>
    where
        F: FnOnce(&T, &mut Collector),
    {
        let label = description.into();
        let Some(subject) = self.subject.as_ref() else {
            trace!(node = %self.description, block = %label, "skipped block on absent subject");
            return R::proceed(self);
        };
        let mut scope = Collector::new();
        block(subject, &mut scope);
        let record = scope.fold(format!("{}: {label}", self.description), rule);
        R::settle(self, record)
    }

    /// Groups further checks on the same subject; the group passes only if every
    /// check inside it passes.
    pub fn and<F>(self, block: F) -> R::Step<T>
    where
        F: FnOnce(Assertion<&T, &mut Collector>),
    {
        let description = self.description.clone();
        self.nested("and", Rule::All, move |subject, scope| {
            block(scope.expect(subject).described_as(description))
        })
    }
}

impl<T, R> Assertion<T, R>
where
    T: Clone + IntoIterator,
    R: Recorder,
{
    /// Passes when `block` holds for every element.
    pub fn all<F>(self, block: F) -> R::Step<T>
    where
        F: FnMut(Assertion<T::Item, &mut Collector>),
    {
        self.each("all elements match predicate", Rule::All, block)
    }

    /// Passes when `block` holds for at least one element. An empty subject fails.
    pub fn any<F>(self, block: F) -> R::Step<T>
    where
        F: FnMut(Assertion<T::Item, &mut Collector>),
    {
        self.each("at least one element matches predicate", Rule::Any, block)
    }

    /// Passes when `block` holds for no element.
    pub fn none<F>(self, block: F) -> R::Step<T>
    where
        F: FnMut(Assertion<T::Item, &mut Collector>),
    {
        self.each("no elements match predicate", Rule::None, block)
    }

    fn each<F>(self, description: &str, rule: Rule, mut block: F) -> R::Step<T>
    where
        F: FnMut(Assertion<T::Item, &mut Collector>),
    {
        self.nested(description, rule, |subject, scope| {
            for (index, element) in subject.clone().into_iter().enumerate() {
                let label = format!("element [{index}]");
                let mut element_scope = Collector::new();
                block(element_scope.expect(element).described_as(label.clone()));
                scope.push(element_scope.fold(label, Rule::All));
            }
        })
    }
}
