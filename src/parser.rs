use crate::{ConfigError, ConfigErrorKind};

/// Turns one matched string into one or more claims.
///
/// Parsers are total: they must return a result for every input, including
/// the empty string, and must not panic.
pub trait Parser {
    /// Splits `value` into claims, in order.
    fn parse(&self, value: &str) -> Vec<String>;
}

impl<P: Parser + ?Sized> Parser for &P {
    fn parse(&self, value: &str) -> Vec<String> {
        (**self).parse(value)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    fn parse(&self, value: &str) -> Vec<String> {
        (**self).parse(value)
    }
}

/// Returns the matched value as the single claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpParser;

impl Parser for NoOpParser {
    fn parse(&self, value: &str) -> Vec<String> {
        vec![value.to_string()]
    }
}

/// Splits the matched value on every occurrence of a separator.
///
/// Segments are returned exactly as [`str::split`] produces them: nothing is
/// trimmed and empty segments are kept. An empty input yields one empty
/// claim.
///
/// # Examples
///
/// ```
/// use x509_claims::{Parser, SplitParser};
///
/// let parser = SplitParser::new(".").unwrap();
/// assert_eq!(parser.parse("claim1.claim2"), ["claim1", "claim2"]);
/// assert_eq!(parser.parse("a..b"), ["a", "", "b"]);
/// assert_eq!(parser.parse(""), [""]);
/// ```
///
/// An empty separator is rejected:
///
/// ```
/// use x509_claims::{ConfigErrorKind, SplitParser};
///
/// let error = SplitParser::new("").unwrap_err();
/// assert_eq!(error.kind(), ConfigErrorKind::EmptySeparator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitParser {
    separator: String,
}

impl SplitParser {
    /// Creates a split parser.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorKind::EmptySeparator`] if `separator` is empty.
    pub fn new(separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::new(
                ConfigErrorKind::EmptySeparator,
                "split parser separator must not be empty",
            ));
        }
        Ok(Self { separator })
    }

    /// Returns the configured separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Parser for SplitParser {
    fn parse(&self, value: &str) -> Vec<String> {
        value
            .split(self.separator.as_str())
            .map(str::to_string)
            .collect()
    }
}
