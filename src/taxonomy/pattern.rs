//! Name patterns for trainer classification.
//!
//! Patterns are plain data matched against a normalized (lowercased,
//! apostrophe-folded) card name. They are compared, cloned and listed
//! independently of the evaluator that applies them.

use std::borrow::Cow;

/// A single name test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamePattern {
    /// Whole name equals the text.
    Exact(Cow<'static, str>),

    /// Name starts with the text.
    Prefix(Cow<'static, str>),

    /// Name ends with the text.
    Suffix(Cow<'static, str>),

    /// Name contains the text anywhere.
    Contains(Cow<'static, str>),
}

impl NamePattern {
    /// Build an owned exact-match pattern.
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(Cow::Owned(text.into().to_lowercase()))
    }

    /// Build an owned prefix pattern.
    pub fn prefix(text: impl Into<String>) -> Self {
        Self::Prefix(Cow::Owned(text.into().to_lowercase()))
    }

    /// Build an owned suffix pattern.
    pub fn suffix(text: impl Into<String>) -> Self {
        Self::Suffix(Cow::Owned(text.into().to_lowercase()))
    }

    /// Build an owned substring pattern.
    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(Cow::Owned(text.into().to_lowercase()))
    }

    /// Test a normalized name.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Exact(t) => normalized == &**t,
            Self::Prefix(t) => normalized.starts_with(&**t),
            Self::Suffix(t) => normalized.ends_with(&**t),
            Self::Contains(t) => normalized.contains(&**t),
        }
    }
}

/// `const` constructors for the static tables.
pub(crate) const fn exact(text: &'static str) -> NamePattern {
    NamePattern::Exact(Cow::Borrowed(text))
}

pub(crate) const fn prefix(text: &'static str) -> NamePattern {
    NamePattern::Prefix(Cow::Borrowed(text))
}

pub(crate) const fn suffix(text: &'static str) -> NamePattern {
    NamePattern::Suffix(Cow::Borrowed(text))
}

pub(crate) const fn contains(text: &'static str) -> NamePattern {
    NamePattern::Contains(Cow::Borrowed(text))
}

/// Lowercase, trim, and fold curly apostrophes so `’s` patterns match.
#[must_use]
pub fn normalize(name: &str) -> String {
    crate::cards::catalog::normalize_name(name)
}
