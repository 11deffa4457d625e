use std::any::type_name;
use std::fmt::Display;

use affirm_core::{AffirmError, Detail, Failure, Outcome, Record};
use tracing::trace;

use crate::narrow::Narrow;
use crate::predicates::{predicate, Predicate};
use crate::reporter::report;

/// Destination for the records produced by checks on a node.
///
/// The recorder decides what a check hands back: a top-level chain surfaces
/// failures immediately, a chain inside a composition block keeps going so
/// that sibling checks still run.
pub trait Recorder: Sized {
    /// Value handed back to the caller after a check.
    type Step<T>;

    /// Stores `record` and continues the chain with `node`.
    fn settle<T>(node: Assertion<T, Self>, record: Record) -> Self::Step<T>;

    /// Continues the chain without recording anything.
    fn proceed<T>(node: Assertion<T, Self>) -> Self::Step<T>;
}

/// Recorder of a top-level chain with no enclosing block.
///
/// Every check returns `Result`, so a failure is surfaced to the caller as
/// soon as it is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Root;

impl Recorder for Root {
    type Step<T> = Result<Assertion<T, Root>, AffirmError>;

    fn settle<T>(node: Assertion<T, Self>, record: Record) -> Self::Step<T> {
        report(&record)?;
        Ok(node)
    }

    fn proceed<T>(node: Assertion<T, Self>) -> Self::Step<T> {
        Ok(node)
    }
}

/// A subject under test together with the recorder its checks report to.
///
/// The subject is absent once a narrowing check failed inside a composition
/// block; later checks on such a node are skipped.
#[derive(Debug)]
pub struct Assertion<T, R = Root> {
    pub(crate) subject: Option<T>,
    pub(crate) description: String,
    pub(crate) recorder: R,
}

/// Creates a top-level assertion over `subject`.
pub fn expect<T>(subject: T) -> Assertion<T, Root> {
    Assertion::new(subject, Root)
}

impl<T, R> Assertion<T, R> {
    pub(crate) fn new(subject: T, recorder: R) -> Self {
        Self {
            subject: Some(subject),
            description: "subject".to_string(),
            recorder,
        }
    }

    /// The subject, if no earlier narrowing failed.
    pub fn subject(&self) -> Option<&T> {
        self.subject.as_ref()
    }

    /// Description used as the prefix of every record this node produces.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the node description.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Maps the subject to a derived value without recording a check.
    pub fn get<U>(self, name: impl Display, map: impl FnOnce(T) -> U) -> Assertion<U, R> {
        Assertion {
            subject: self.subject.map(map),
            description: format!("{}.{name}", self.description),
            recorder: self.recorder,
        }
    }
}

impl<'a, T: Clone, R> Assertion<&'a T, R> {
    /// Clones a borrowed subject, e.g. inside an `and` block, so that checks
    /// needing an owned value apply.
    pub fn cloned(self) -> Assertion<T, R> {
        Assertion {
            subject: self.subject.cloned(),
            description: self.description,
            recorder: self.recorder,
        }
    }
}

impl<T, R: Recorder> Assertion<T, R> {
    /// Runs a narrowing check. A failure leaves the subject absent.
    pub(crate) fn evaluate<U>(
        self,
        label: String,
        check: impl FnOnce(T) -> Result<U, Failure>,
    ) -> R::Step<U> {
        self.record(label, |subject| match check(subject) {
            Ok(next) => (Outcome::Passed, Some(next)),
            Err(failure) => (Outcome::Failed(failure), None),
        })
    }

    /// Runs a check that keeps the subject, passed or not.
    pub(crate) fn inspect(
        self,
        label: String,
        check: impl FnOnce(&T) -> Result<(), Failure>,
    ) -> R::Step<T> {
        self.record(label, |subject| {
            let outcome = match check(&subject) {
                Ok(()) => Outcome::Passed,
                Err(failure) => Outcome::Failed(failure),
            };
            (outcome, Some(subject))
        })
    }

    fn record<U>(self, label: String, step: impl FnOnce(T) -> (Outcome, Option<U>)) -> R::Step<U> {
        let Assertion {
            subject,
            description,
            recorder,
        } = self;
        let Some(subject) = subject else {
            trace!(node = %description, check = %label, "skipped check on absent subject");
            return R::proceed(Assertion {
                subject: None,
                description,
                recorder,
            });
        };
        let (outcome, next) = step(subject);
        trace!(node = %description, check = %label, passed = outcome.is_passed(), "recorded check");
        let record = Record::leaf(format!("{description}: {label}"), outcome);
        R::settle(
            Assertion {
                subject: next,
                description,
                recorder,
            },
            record,
        )
    }

    /// Runs a custom narrowing check that either yields the narrowed subject or
    /// explains why it could not.
    pub fn narrow<U>(
        self,
        label: impl Into<String>,
        narrow: impl FnOnce(T) -> Result<U, Detail>,
    ) -> R::Step<U> {
        self.evaluate(label.into(), |subject| narrow(subject).map_err(Failure::check))
    }

    /// Runs a leaf predicate against the subject.
    pub fn satisfies<P: Predicate<T>>(self, check: P) -> R::Step<T> {
        self.inspect(check.description(), move |subject| {
            check.evaluate(subject).map_err(Failure::check)
        })
    }

    /// Runs an ad-hoc closure check against the subject.
    pub fn assert_that<F>(self, label: impl Into<String>, check: F) -> R::Step<T>
    where
        F: Fn(&T) -> Result<(), Detail>,
    {
        self.satisfies(predicate::<T, F>(label, check))
    }

    /// Passes when the subject's runtime type is `U`, narrowing the chain to it.
    pub fn is_a<U>(self) -> R::Step<U>
    where
        T: Narrow<U>,
    {
        let expected = type_name::<U>();
        self.evaluate(format!("is an instance of {expected}"), |subject| {
            subject.narrow().map_err(|actual| {
                Failure::check(
                    Detail::new("is-a", format!("expected an instance of {expected}"))
                        .with_context("expected", expected)
                        .with_context("actual", actual),
                )
            })
        })
    }
}
