use std::fmt;

use url::Url;

/// The kind of value a [`Locator`](crate::Locator) produces and a
/// [`Matcher`](crate::Matcher) consumes.
///
/// Statically typed pipelines never need this: the compiler already refuses
/// to pair a `Matcher<Url>` with a text locator. It exists for pipelines
/// assembled from data (see [`ProviderConfig`](crate::ProviderConfig)), where
/// the pairing is checked once while the provider is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Plain strings: common names, email addresses, DNS names.
    Text,
    /// Parsed URIs from URI subject alternative names.
    Uri,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Uri => write!(f, "uri"),
        }
    }
}

/// A candidate value that has a claim string projection.
///
/// Locators project every accepted value through [`ClaimValue::into_claim`]
/// before handing it to a parser. Only types implementing this trait can be
/// located, which is also what bounds [`AllMatcher`](crate::AllMatcher).
pub trait ClaimValue {
    /// The tag identifying this value type.
    const KIND: ValueKind;

    /// Converts the value into the string handed to a parser.
    fn into_claim(self) -> String;
}

impl ClaimValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_claim(self) -> String {
        self
    }
}

impl ClaimValue for Url {
    const KIND: ValueKind = ValueKind::Uri;

    /// The canonical serialization of the URI.
    fn into_claim(self) -> String {
        self.into()
    }
}
