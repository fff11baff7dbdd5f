use url::Url;

use crate::ClaimValue;

/// Outcome of applying a [`Matcher`] to one candidate value.
///
/// A rejected value is handed back unchanged; an accepted value may have been
/// transformed (for example with a sentinel prefix stripped).
///
/// # Examples
///
/// ```
/// use x509_claims::{Match, Matcher, PrefixMatcher};
///
/// let matcher = PrefixMatcher::new("SENTINEL:");
/// assert_eq!(
///     matcher.match_value("SENTINEL:a.b".to_string()),
///     Match::Accepted("a.b".to_string())
/// );
/// assert_eq!(
///     matcher.match_value("other".to_string()),
///     Match::Rejected("other".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<T> {
    /// The value is claim-bearing.
    Accepted(T),
    /// The value is not a claim; carries the original input.
    Rejected(T),
}

impl<T> Match<T> {
    /// Builds a `Match` from a value and an acceptance flag.
    pub fn new(value: T, matched: bool) -> Self {
        if matched {
            Self::Accepted(value)
        } else {
            Self::Rejected(value)
        }
    }

    /// Returns `true` if the value was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Returns the accepted value, or `None` if it was rejected.
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the carried value regardless of the outcome.
    pub fn into_inner(self) -> T {
        match self {
            Self::Accepted(value) | Self::Rejected(value) => value,
        }
    }
}

/// Decides whether a candidate value is claim-bearing.
///
/// Matchers are pure functions of their input and their own configuration.
/// "No match" is data, never an error: implementations must not panic and
/// must return [`Match::Rejected`] for values they do not accept.
///
/// # Examples
///
/// A custom matcher accepting only lowercase values:
///
/// ```
/// use x509_claims::{Match, Matcher};
///
/// struct Lowercase;
///
/// impl Matcher<String> for Lowercase {
///     fn match_value(&self, value: String) -> Match<String> {
///         let ok = value.chars().all(|c| !c.is_uppercase());
///         Match::new(value, ok)
///     }
/// }
///
/// assert!(Lowercase.match_value("abc".to_string()).is_accepted());
/// assert!(!Lowercase.match_value("aBc".to_string()).is_accepted());
/// ```
pub trait Matcher<T> {
    /// Applies the matcher to one candidate value.
    fn match_value(&self, value: T) -> Match<T>;
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn match_value(&self, value: T) -> Match<T> {
        (**self).match_value(value)
    }
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn match_value(&self, value: T) -> Match<T> {
        (**self).match_value(value)
    }
}

/// Matches strings starting with a prefix and strips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    /// Creates a matcher for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher<String> for PrefixMatcher {
    fn match_value(&self, value: String) -> Match<String> {
        match value.strip_prefix(self.prefix.as_str()) {
            Some(rest) => Match::Accepted(rest.to_string()),
            None => Match::Rejected(value),
        }
    }
}

/// Matches strings ending with a suffix and strips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMatcher {
    suffix: String,
}

impl SuffixMatcher {
    /// Creates a matcher for the given suffix.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Returns the configured suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Matcher<String> for SuffixMatcher {
    fn match_value(&self, value: String) -> Match<String> {
        match value.strip_suffix(self.suffix.as_str()) {
            Some(rest) => Match::Accepted(rest.to_string()),
            None => Match::Rejected(value),
        }
    }
}

/// Matches URIs whose scheme equals the configured scheme.
///
/// The comparison is exact and case-sensitive against the parsed scheme,
/// which `url` always stores lowercased. The URI is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeMatcher {
    scheme: String,
}

impl SchemeMatcher {
    /// Creates a matcher for the given scheme, e.g. `"spiffe"`.
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    /// Returns the configured scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl Matcher<Url> for SchemeMatcher {
    fn match_value(&self, value: Url) -> Match<Url> {
        let matched = value.scheme() == self.scheme;
        Match::new(value, matched)
    }
}

/// Accepts every value unchanged.
///
/// Only implemented for [`ClaimValue`] types, so it can only be paired with
/// locators whose values project to a claim string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllMatcher;

impl<T: ClaimValue> Matcher<T> for AllMatcher {
    fn match_value(&self, value: T) -> Match<T> {
        Match::Accepted(value)
    }
}
