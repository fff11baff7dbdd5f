use crate::{Certificate, Locator, Matcher, Parser};

/// A single extraction rule producing claims from a certificate.
///
/// Definitions are immutable once built and are shared across threads by
/// [`BasicProvider`](crate::BasicProvider), hence the `Send + Sync` bound.
pub trait Definition: Send + Sync {
    /// Returns the claims this rule extracts, in encounter order.
    fn claims(&self, cert: &Certificate) -> Vec<String>;

    /// Optional diagnostic name.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Locator → Matcher → Parser composition.
///
/// The locator reads candidates of type `L::Value` and the matcher must accept
/// exactly that type, so mismatched stages fail to compile. Every accepted
/// value is parsed and the parser outputs are concatenated in order.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use x509_claims::{
///     Certificate, Definition, LmpDefinition, NoOpParser, SchemeMatcher, UriSanLocator,
/// };
///
/// let spiffe = LmpDefinition::new(UriSanLocator, SchemeMatcher::new("spiffe"), NoOpParser)
///     .named("spiffe-id");
///
/// let cert = Certificate::new()
///     .with_uri(Url::parse("spiffe://td/workload").unwrap())
///     .with_uri(Url::parse("https://example.com/").unwrap());
///
/// assert_eq!(spiffe.claims(&cert), ["spiffe://td/workload"]);
/// assert_eq!(spiffe.name(), Some("spiffe-id"));
/// ```
///
/// Pairing a URI matcher with a text locator does not compile:
///
/// ```compile_fail
/// use x509_claims::{EmailSanLocator, LmpDefinition, NoOpParser, SchemeMatcher};
///
/// let _ = LmpDefinition::new(EmailSanLocator, SchemeMatcher::new("spiffe"), NoOpParser);
/// ```
#[derive(Debug, Clone)]
pub struct LmpDefinition<L, M, P> {
    name: Option<String>,
    locator: L,
    matcher: M,
    parser: P,
}

impl<L, M, P> LmpDefinition<L, M, P>
where
    L: Locator,
    M: Matcher<L::Value>,
    P: Parser,
{
    /// Binds a locator, matcher and parser into one rule.
    pub fn new(locator: L, matcher: M, parser: P) -> Self {
        Self {
            name: None,
            locator,
            matcher,
            parser,
        }
    }

    /// Attaches a diagnostic name, reported in trace events.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the locator.
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Returns the matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Returns the parser.
    pub fn parser(&self) -> &P {
        &self.parser
    }
}

impl<L, M, P> Definition for LmpDefinition<L, M, P>
where
    L: Locator + Send + Sync,
    M: Matcher<L::Value> + Send + Sync,
    P: Parser + Send + Sync,
{
    fn claims(&self, cert: &Certificate) -> Vec<String> {
        let matched = self.locator.locate(cert, &self.matcher);
        let claims: Vec<String> = matched
            .iter()
            .flat_map(|value| self.parser.parse(value))
            .collect();

        tracing::trace!(
            definition = self.name.as_deref().unwrap_or("lmp"),
            matched = matched.len(),
            claims = claims.len(),
            "evaluated definition"
        );

        claims
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
