use std::any::Any;
use std::error::Error;
use std::fmt::Debug;

use affirm_core::{Detail, Failure};

use crate::catching::CaughtError;
use crate::node::{Assertion, Recorder};

/// Checked conversion of a dynamically typed subject into a concrete type.
///
/// A mismatch is reported as a tagged `Err` carrying a description of what was
/// found instead; narrowing never panics.
pub trait Narrow<U>: Sized {
    /// Returns the narrowed value or a description of the actual subject.
    fn narrow(self) -> Result<U, String>;
}

impl<U: Any> Narrow<U> for Box<dyn Any> {
    fn narrow(self) -> Result<U, String> {
        self.downcast::<U>()
            .map(|value| *value)
            .map_err(|_| "a value of another type".to_string())
    }
}

impl<U: Any> Narrow<U> for Box<dyn Any + Send> {
    fn narrow(self) -> Result<U, String> {
        self.downcast::<U>()
            .map(|value| *value)
            .map_err(|_| "a value of another type".to_string())
    }
}

impl<'a, U: Any> Narrow<&'a U> for &'a Box<dyn Any> {
    fn narrow(self) -> Result<&'a U, String> {
        (**self)
            .downcast_ref::<U>()
            .ok_or_else(|| "a value of another type".to_string())
    }
}

impl<U: Error + 'static> Narrow<U> for CaughtError {
    fn narrow(self) -> Result<U, String> {
        self.downcast::<U>()
            .map(|error| *error)
            .map_err(|error| format!("error: {error}"))
    }
}

impl<'a, U: Error + 'static> Narrow<&'a U> for &'a CaughtError {
    fn narrow(self) -> Result<&'a U, String> {
        (**self)
            .downcast_ref::<U>()
            .ok_or_else(|| format!("error: {self}"))
    }
}

// `None` is never an instance of any type.
impl<U, T: Narrow<U>> Narrow<U> for Option<T> {
    fn narrow(self) -> Result<U, String> {
        match self {
            Some(value) => value.narrow(),
            None => Err("None".to_string()),
        }
    }
}

impl<U, R: Recorder> Assertion<Option<U>, R> {
    /// Passes when the subject is `None`.
    pub fn is_null(self) -> R::Step<Option<U>>
    where
        U: Debug,
    {
        self.evaluate("is null".to_string(), |subject| match subject {
            None => Ok(None),
            Some(value) => Err(Failure::check(
                Detail::new("is-null", "expected subject to be None").actual(&value),
            )),
        })
    }

    /// Passes when the subject is present, narrowing the chain to the inner value.
    pub fn is_not_null(self) -> R::Step<U> {
        self.evaluate("is not null".to_string(), |subject| {
            subject.ok_or_else(|| {
                Failure::check(
                    Detail::new("is-not-null", "expected subject to be present")
                        .with_context("actual", "None"),
                )
            })
        })
    }
}
