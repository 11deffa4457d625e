use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use affirm_core::Detail;

use super::Predicate;
use crate::node::{Assertion, Recorder};

/// Subjects with a size and elements that can be searched for.
///
/// Maps expose their keys as elements; text exposes its characters.
pub trait Collection {
    /// Element type searched by [`Collection::includes`].
    type Element;

    /// Number of elements.
    fn size(&self) -> usize;

    /// Whether an element equal to `element` is present.
    fn includes(&self, element: &Self::Element) -> bool
    where
        Self::Element: PartialEq;
}

impl<E> Collection for [E] {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<E, const N: usize> Collection for [E; N] {
    type Element = E;

    fn size(&self) -> usize {
        N
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.as_slice().includes(element)
    }
}

impl<E> Collection for Vec<E> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.as_slice().includes(element)
    }
}

impl<E> Collection for VecDeque<E> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<E> Collection for BTreeSet<E> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<E, S> Collection for HashSet<E, S> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    type Element = K;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &K) -> bool
    where
        K: PartialEq,
    {
        self.keys().any(|candidate| candidate == element)
    }
}

impl<K, V, S> Collection for HashMap<K, V, S> {
    type Element = K;

    fn size(&self) -> usize {
        self.len()
    }

    fn includes(&self, element: &K) -> bool
    where
        K: PartialEq,
    {
        self.keys().any(|candidate| candidate == element)
    }
}

impl Collection for str {
    type Element = char;

    fn size(&self) -> usize {
        self.chars().count()
    }

    fn includes(&self, element: &char) -> bool {
        self.contains(*element)
    }
}

impl Collection for String {
    type Element = char;

    fn size(&self) -> usize {
        self.as_str().size()
    }

    fn includes(&self, element: &char) -> bool {
        self.as_str().includes(element)
    }
}

impl<C: Collection + ?Sized> Collection for &C {
    type Element = C::Element;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn includes(&self, element: &C::Element) -> bool
    where
        C::Element: PartialEq,
    {
        (**self).includes(element)
    }
}

/// Holds when the collection has exactly `size` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasSize {
    size: usize,
}

impl HasSize {
    /// Creates the predicate.
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl<C: Collection + ?Sized> Predicate<C> for HasSize {
    fn description(&self) -> String {
        format!("has size {}", self.size)
    }

    fn evaluate(&self, subject: &C) -> Result<(), Detail> {
        let actual = subject.size();
        if actual == self.size {
            Ok(())
        } else {
            Err(Detail::new("has-size", "unexpected collection size")
                .expected(&self.size)
                .actual(&actual))
        }
    }
}

/// Holds when the collection has no elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsEmpty;

impl<C: Collection + ?Sized> Predicate<C> for IsEmpty {
    fn description(&self) -> String {
        "is empty".to_string()
    }

    fn evaluate(&self, subject: &C) -> Result<(), Detail> {
        match subject.size() {
            0 => Ok(()),
            size => Err(Detail::new("is-empty", "expected no elements")
                .with_context("size", size.to_string())),
        }
    }
}

/// Holds when the collection has at least one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNotEmpty;

impl<C: Collection + ?Sized> Predicate<C> for IsNotEmpty {
    fn description(&self) -> String {
        "is not empty".to_string()
    }

    fn evaluate(&self, subject: &C) -> Result<(), Detail> {
        match subject.size() {
            0 => Err(Detail::new("is-not-empty", "expected at least one element")),
            _ => Ok(()),
        }
    }
}

/// Holds when the collection includes the element.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainsElement<E> {
    element: E,
}

impl<E> ContainsElement<E> {
    /// Creates the predicate.
    pub fn new(element: E) -> Self {
        Self { element }
    }
}

impl<C, E> Predicate<C> for ContainsElement<E>
where
    C: Collection<Element = E> + ?Sized,
    E: PartialEq + Debug,
{
    fn description(&self) -> String {
        format!("contains {:?}", self.element)
    }

    fn evaluate(&self, subject: &C) -> Result<(), Detail> {
        if subject.includes(&self.element) {
            Ok(())
        } else {
            Err(Detail::new("contains", "element not found")
                .expected(&self.element)
                .with_context("size", subject.size().to_string()))
        }
    }
}

impl<C: Collection, R: Recorder> Assertion<C, R> {
    /// Passes when the collection has exactly `size` elements.
    pub fn has_size(self, size: usize) -> R::Step<C> {
        self.satisfies(HasSize::new(size))
    }

    /// Passes when the collection has no elements.
    pub fn is_empty(self) -> R::Step<C> {
        self.satisfies(IsEmpty)
    }

    /// Passes when the collection has at least one element.
    pub fn is_not_empty(self) -> R::Step<C> {
        self.satisfies(IsNotEmpty)
    }

    /// Passes when the collection includes `element`.
    pub fn contains(self, element: C::Element) -> R::Step<C>
    where
        C::Element: PartialEq + Debug,
    {
        self.satisfies(ContainsElement::new(element))
    }
}
