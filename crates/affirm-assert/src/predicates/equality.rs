use std::any::{type_name, Any, TypeId};
use std::fmt::Debug;

use affirm_core::Detail;

use super::Predicate;
use crate::node::{Assertion, Recorder};

/// Holds when the subject equals the expected value and has the same type.
///
/// Values of different types never compare equal, so `1i32` is not equal to
/// `1i64`. Text is the exception: `String` and `&str` compare by content.
#[derive(Debug, Clone, PartialEq)]
pub struct IsEqualTo<E> {
    expected: E,
}

impl<E> IsEqualTo<E> {
    /// Creates the predicate.
    pub fn new(expected: E) -> Self {
        Self { expected }
    }
}

fn as_text(value: &dyn Any) -> Option<&str> {
    value
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| value.downcast_ref::<&'static str>().copied())
}

fn same_value<T, E>(subject: &T, expected: &E) -> bool
where
    T: PartialEq + Any,
    E: Any,
{
    if let (Some(subject), Some(expected)) = (as_text(subject), as_text(expected)) {
        return subject == expected;
    }
    (expected as &dyn Any)
        .downcast_ref::<T>()
        .is_some_and(|expected| expected == subject)
}

fn comparable<T: Any, E: Any>(subject: &T, expected: &E) -> bool {
    TypeId::of::<T>() == TypeId::of::<E>()
        || (as_text(subject).is_some() && as_text(expected).is_some())
}

impl<T, E> Predicate<T> for IsEqualTo<E>
where
    T: PartialEq + Debug + Any,
    E: Debug + Any,
{
    fn description(&self) -> String {
        format!("is equal to {:?}", self.expected)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        if same_value(subject, &self.expected) {
            return Ok(());
        }
        let detail = Detail::new("is-equal-to", "expected subject to equal the expected value")
            .expected(&self.expected)
            .actual(subject);
        if comparable(subject, &self.expected) {
            Err(detail)
        } else {
            Err(detail.with_hint(format!(
                "subject is a {} but the expected value is a {}",
                type_name::<T>(),
                type_name::<E>()
            )))
        }
    }
}

/// Negation of [`IsEqualTo`].
#[derive(Debug, Clone, PartialEq)]
pub struct IsNotEqualTo<E> {
    unexpected: E,
}

impl<E> IsNotEqualTo<E> {
    /// Creates the predicate.
    pub fn new(unexpected: E) -> Self {
        Self { unexpected }
    }
}

impl<T, E> Predicate<T> for IsNotEqualTo<E>
where
    T: PartialEq + Debug + Any,
    E: Debug + Any,
{
    fn description(&self) -> String {
        format!("is not equal to {:?}", self.unexpected)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        if same_value(subject, &self.unexpected) {
            Err(
                Detail::new("is-not-equal-to", "expected subject to differ from the value")
                    .actual(subject),
            )
        } else {
            Ok(())
        }
    }
}

impl<T, R> Assertion<T, R>
where
    T: PartialEq + Debug + Any,
    R: Recorder,
{
    /// Passes when the subject equals `expected`.
    pub fn is_equal_to<E: Debug + Any>(self, expected: E) -> R::Step<T> {
        self.satisfies(IsEqualTo::new(expected))
    }

    /// Passes when the subject does not equal `unexpected`.
    pub fn is_not_equal_to<E: Debug + Any>(self, unexpected: E) -> R::Step<T> {
        self.satisfies(IsNotEqualTo::new(unexpected))
    }
}

impl<R: Recorder> Assertion<bool, R> {
    /// Passes when the subject is `true`.
    pub fn is_true(self) -> R::Step<bool> {
        self.is_equal_to(true)
    }

    /// Passes when the subject is `false`.
    pub fn is_false(self) -> R::Step<bool> {
        self.is_equal_to(false)
    }
}
