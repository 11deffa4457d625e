//! Leaf checks run by assertion nodes.
//!
//! Each predicate is a small stateless struct implementing [`Predicate`]. The
//! fluent methods on [`Assertion`](crate::Assertion) that wrap them live next to
//! the predicates, grouped by the capability the subject has to offer.

use std::fmt;

use affirm_core::Detail;

mod collection;
mod equality;
mod ordering;
mod text;

pub use collection::{Collection, ContainsElement, HasSize, IsEmpty, IsNotEmpty};
pub use equality::{IsEqualTo, IsNotEqualTo};
pub use ordering::{IsGreaterThan, IsIn, IsLessThan};
pub use text::{
    Affix, ContainsSubstring, EndsWith, HasLength, IsBlank, IsLowerCase, IsNotBlank, IsUpperCase,
    StartsWith,
};

/// A leaf check over subjects of type `T`.
pub trait Predicate<T: ?Sized> {
    /// Description recorded alongside the outcome, e.g. `starts with "c"`.
    fn description(&self) -> String;

    /// Runs the check. `Err` explains why it did not hold.
    fn evaluate(&self, subject: &T) -> Result<(), Detail>;
}

/// Predicate backed by a closure.
pub struct FnPredicate<F> {
    description: String,
    check: F,
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized, F> Predicate<T> for FnPredicate<F>
where
    F: Fn(&T) -> Result<(), Detail>,
{
    fn description(&self) -> String {
        self.description.clone()
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        (self.check)(subject)
    }
}

/// Wraps `check` as a [`Predicate`] with the given description.
pub fn predicate<T: ?Sized, F>(description: impl Into<String>, check: F) -> FnPredicate<F>
where
    F: Fn(&T) -> Result<(), Detail>,
{
    FnPredicate {
        description: description.into(),
        check,
    }
}
