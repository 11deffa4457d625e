use std::fmt;

use affirm_core::Detail;

use super::Predicate;
use crate::node::{Assertion, Recorder};

/// Prefix, suffix or fragment searched for in a text subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affix(String);

impl Affix {
    /// The searched text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<char> for Affix {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Affix {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Affix {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Affix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Holds when the text has exactly `length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasLength {
    length: usize,
}

impl HasLength {
    /// Creates the predicate.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl<T: AsRef<str> + ?Sized> Predicate<T> for HasLength {
    fn description(&self) -> String {
        format!("has length {}", self.length)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let actual = subject.as_ref().chars().count();
        if actual == self.length {
            Ok(())
        } else {
            Err(Detail::new("has-length", "unexpected text length")
                .expected(&self.length)
                .actual(&actual)
                .with_context("text", subject.as_ref()))
        }
    }
}

/// Holds when lower-casing the text leaves it unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsLowerCase;

impl<T: AsRef<str> + ?Sized> Predicate<T> for IsLowerCase {
    fn description(&self) -> String {
        "is lower case".to_string()
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text == text.to_lowercase() {
            Ok(())
        } else {
            Err(Detail::new("is-lower-case", "expected lower case text").actual(text))
        }
    }
}

/// Holds when upper-casing the text leaves it unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsUpperCase;

impl<T: AsRef<str> + ?Sized> Predicate<T> for IsUpperCase {
    fn description(&self) -> String {
        "is upper case".to_string()
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text == text.to_uppercase() {
            Ok(())
        } else {
            Err(Detail::new("is-upper-case", "expected upper case text").actual(text))
        }
    }
}

/// Holds when the text starts with the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartsWith {
    prefix: Affix,
}

impl StartsWith {
    /// Creates the predicate.
    pub fn new(prefix: impl Into<Affix>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl<T: AsRef<str> + ?Sized> Predicate<T> for StartsWith {
    fn description(&self) -> String {
        format!("starts with {}", self.prefix)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text.starts_with(self.prefix.as_str()) {
            Ok(())
        } else {
            Err(Detail::new("starts-with", "text does not start with the prefix")
                .expected(self.prefix.as_str())
                .actual(text))
        }
    }
}

/// Holds when the text ends with the suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndsWith {
    suffix: Affix,
}

impl EndsWith {
    /// Creates the predicate.
    pub fn new(suffix: impl Into<Affix>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl<T: AsRef<str> + ?Sized> Predicate<T> for EndsWith {
    fn description(&self) -> String {
        format!("ends with {}", self.suffix)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text.ends_with(self.suffix.as_str()) {
            Ok(())
        } else {
            Err(Detail::new("ends-with", "text does not end with the suffix")
                .expected(self.suffix.as_str())
                .actual(text))
        }
    }
}

/// Holds when the text contains the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainsSubstring {
    fragment: Affix,
}

impl ContainsSubstring {
    /// Creates the predicate.
    pub fn new(fragment: impl Into<Affix>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl<T: AsRef<str> + ?Sized> Predicate<T> for ContainsSubstring {
    fn description(&self) -> String {
        format!("contains {}", self.fragment)
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text.contains(self.fragment.as_str()) {
            Ok(())
        } else {
            Err(Detail::new("contains", "text does not contain the fragment")
                .expected(self.fragment.as_str())
                .actual(text))
        }
    }
}

/// Holds when the text is empty or only whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsBlank;

impl<T: AsRef<str> + ?Sized> Predicate<T> for IsBlank {
    fn description(&self) -> String {
        "is blank".to_string()
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text.trim().is_empty() {
            Ok(())
        } else {
            Err(Detail::new("is-blank", "expected blank text").actual(text))
        }
    }
}

/// Holds when the text has at least one non-whitespace character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNotBlank;

impl<T: AsRef<str> + ?Sized> Predicate<T> for IsNotBlank {
    fn description(&self) -> String {
        "is not blank".to_string()
    }

    fn evaluate(&self, subject: &T) -> Result<(), Detail> {
        let text = subject.as_ref();
        if text.trim().is_empty() {
            Err(Detail::new("is-not-blank", "expected text with visible characters").actual(text))
        } else {
            Ok(())
        }
    }
}

impl<T: AsRef<str>, R: Recorder> Assertion<T, R> {
    /// Passes when the text has exactly `length` characters.
    pub fn has_length(self, length: usize) -> R::Step<T> {
        self.satisfies(HasLength::new(length))
    }

    /// Passes when the text has no upper case characters.
    pub fn is_lower_case(self) -> R::Step<T> {
        self.satisfies(IsLowerCase)
    }

    /// Passes when the text has no lower case characters.
    pub fn is_upper_case(self) -> R::Step<T> {
        self.satisfies(IsUpperCase)
    }

    /// Passes when the text starts with `prefix`.
    pub fn starts_with(self, prefix: impl Into<Affix>) -> R::Step<T> {
        self.satisfies(StartsWith::new(prefix))
    }

    /// Passes when the text ends with `suffix`.
    pub fn ends_with(self, suffix: impl Into<Affix>) -> R::Step<T> {
        self.satisfies(EndsWith::new(suffix))
    }

    /// Passes when the text contains `fragment`.
    pub fn contains_substring(self, fragment: impl Into<Affix>) -> R::Step<T> {
        self.satisfies(ContainsSubstring::new(fragment))
    }

    /// Passes when the text is empty or whitespace.
    pub fn is_blank(self) -> R::Step<T> {
        self.satisfies(IsBlank)
    }

    /// Passes when the text has a visible character.
    pub fn is_not_blank(self) -> R::Step<T> {
        self.satisfies(IsNotBlank)
    }
}
