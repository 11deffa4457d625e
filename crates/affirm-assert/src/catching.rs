use std::any::{type_name, Any};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use affirm_core::{Detail, Failure};
use thiserror::Error;
use tracing::debug;

use crate::node::{Assertion, Recorder, Root};

/// Error captured from an action, either returned or raised by a panic.
pub type CaughtError = Box<dyn StdError + Send + Sync + 'static>;

/// Error standing in for a panic raised by a captured action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Panicked {
    /// Panic message, when the payload was a string.
    pub message: String,
}

impl Panicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "panic payload was not a string".to_string(),
            },
        };
        Self { message }
    }
}

/// Result of running an action exactly once.
#[derive(Debug)]
pub enum Captured<T> {
    /// The action returned a value.
    Succeeded(T),
    /// The action returned an error or panicked.
    Failed(CaughtError),
}

impl<T> Captured<T> {
    /// Runs `op` inline on the calling thread and captures its result.
    pub fn capture<E, F>(op: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<CaughtError>,
    {
        let captured = match panic::catch_unwind(AssertUnwindSafe(op)) {
            Ok(Ok(value)) => Captured::Succeeded(value),
            Ok(Err(error)) => Captured::Failed(error.into()),
            Err(payload) => Captured::Failed(Box::new(Panicked::from_payload(payload))),
        };
        debug!(succeeded = captured.is_succeeded(), "captured action result");
        captured
    }

    /// Whether the action returned a value.
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Captured::Succeeded(_))
    }

    /// Whether the action failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Captured::Failed(_))
    }
}

/// Subjects that carry a captured action result, owned or borrowed.
pub trait Capture {
    /// Value produced on success.
    type Value;
    /// Error produced on failure.
    type Error;

    /// Splits the capture into a standard `Result`.
    fn into_result(self) -> Result<Self::Value, Self::Error>;
}

impl<T> Capture for Captured<T> {
    type Value = T;
    type Error = CaughtError;

    fn into_result(self) -> Result<T, CaughtError> {
        match self {
            Captured::Succeeded(value) => Ok(value),
            Captured::Failed(error) => Err(error),
        }
    }
}

impl<'a, T> Capture for &'a Captured<T> {
    type Value = &'a T;
    type Error = &'a CaughtError;

    fn into_result(self) -> Result<&'a T, &'a CaughtError> {
        match self {
            Captured::Succeeded(value) => Ok(value),
            Captured::Failed(error) => Err(error),
        }
    }
}

impl<C: Capture, R: Recorder> Assertion<C, R> {
    /// Passes when the action succeeded, narrowing the chain to its value.
    ///
    /// Asking a failed action for its value is an expectation violation.
    pub fn succeeded(self) -> R::Step<C::Value>
    where
        C::Error: Display,
    {
        self.evaluate("succeeded".to_string(), |capture| {
            capture.into_result().map_err(|error| {
                Failure::violation(
                    Detail::new("succeeded", "expected the action to succeed but it failed")
                        .with_context("error", error.to_string()),
                )
            })
        })
    }

    /// Passes when the action failed, narrowing the chain to its error.
    ///
    /// Asking a successful action for its error is an expectation violation.
    pub fn failed(self) -> R::Step<C::Error> {
        self.evaluate("failed".to_string(), |capture| match capture.into_result() {
            Ok(_) => Err(Failure::violation(
                Detail::new("failed", "expected the action to fail but it returned a value")
                    .with_context("actual", type_name::<C::Value>()),
            )),
            Err(error) => Ok(error),
        })
    }
}

impl<T: Display, R> Assertion<T, R> {
    /// Maps the subject to its display text, typically an error message.
    pub fn message(self) -> Assertion<String, R> {
        self.get("message", |subject| subject.to_string())
    }
}

/// Runs `op` once and creates a top-level assertion over its captured result.
///
/// Both a returned `Err` and a panic are captured as a failure.
pub fn expect_catching<T, E, F>(op: F) -> Assertion<Captured<T>, Root>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<CaughtError>,
{
    Assertion::new(Captured::capture(op), Root).described_as("action")
}

/// Like [`expect_catching`] for actions that only signal failure by panicking.
pub fn expect_catching_panic<T, F>(op: F) -> Assertion<Captured<T>, Root>
where
    F: FnOnce() -> T,
{
    expect_catching(|| Ok::<T, Infallible>(op()))
}
