use std::fmt::Debug;
use std::ops::RangeBounds;

use affirm_core::Detail;

use super::Predicate;
use crate::node::{Assertion, Recorder};

/// Holds when the subject is strictly greater than the bound.
#[derive(Debug, Clone, PartialEq)]
pub struct IsGreaterThan<T> {
    bound: T,
}

impl<T> IsGreaterThan<T> {
    /// Creates the predicate.
    pub fn new(bound: T) -> Self {
        Self { bound }
    }
}

impl<T: PartialOrd + Debug> Predicate<T> for IsGreaterThan<T> {
    fn description(&self) -> String {
        format!("is greater than {:?}", self.bound)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        if *subject > self.bound {
            Ok(())
        } else {
            Err(Detail::new("is-greater-than", "subject is not above the bound")
                .expected(&self.bound)
                .actual(subject))
        }
    }
}

/// Holds when the subject is strictly less than the bound.
#[derive(Debug, Clone, PartialEq)]
pub struct IsLessThan<T> {
    bound: T,
}

impl<T> IsLessThan<T> {
    /// Creates the predicate.
    pub fn new(bound: T) -> Self {
        Self { bound }
    }
}

impl<T: PartialOrd + Debug> Predicate<T> for IsLessThan<T> {
    fn description(&self) -> String {
        format!("is less than {:?}", self.bound)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        if *subject < self.bound {
            Ok(())
        } else {
            Err(Detail::new("is-less-than", "subject is not below the bound")
                .expected(&self.bound)
                .actual(subject))
        }
    }
}

/// Holds when the subject lies within the range.
#[derive(Debug, Clone, PartialEq)]
pub struct IsIn<B> {
    range: B,
}

impl<B> IsIn<B> {
    /// Creates the predicate.
    pub fn new(range: B) -> Self {
        Self { range }
    }
}

impl<T, B> Predicate<T> for IsIn<B>
where
    T: PartialOrd + Debug,
    B: RangeBounds<T> + Debug,
{
    fn description(&self) -> String {
        format!("is in {:?}", self.range)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        if self.range.contains(subject) {
            Ok(())
        } else {
            Err(Detail::new("is-in", "subject is outside the range")
                .expected(&self.range)
                .actual(subject))
        }
    }
}

impl<T: PartialOrd + Debug, R: Recorder> Assertion<T, R> {
    /// Passes when the subject is strictly greater than `bound`.
    pub fn is_greater_than(self, bound: T) -> R::Step<T> {
        self.satisfies(IsGreaterThan::new(bound))
    }

    /// Passes when the subject is strictly less than `bound`.
    pub fn is_less_than(self, bound: T) -> R::Step<T> {
        self.satisfies(IsLessThan::new(bound))
    }

    /// Passes when the subject lies within `range`.
    pub fn is_in<B: RangeBounds<T> + Debug>(self, range: B) -> R::Step<T> {
        self.satisfies(IsIn::new(range))
    }
}
