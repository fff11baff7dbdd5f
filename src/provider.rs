use std::fmt;

use crate::{Certificate, Definition, LmpDefinition, NoOpParser, SchemeMatcher, UriSanLocator};

/// Top-level claims source.
///
/// Implementations return every claim they derive from a certificate. The
/// crate ships [`BasicProvider`]; callers with different orchestration rules
/// can implement this trait themselves.
pub trait Provider {
    /// Returns all claims for `cert`.
    fn claims(&self, cert: &Certificate) -> Vec<String>;
}

/// Ordered list of [`Definition`]s.
///
/// `claims` applies every definition to the same certificate and concatenates
/// their outputs in definition order. Nothing is reordered or deduplicated. An
/// empty provider yields no claims.
///
/// # Examples
///
/// ```
/// use x509_claims::{
///     BasicProvider, Certificate, EmailSanLocator, LmpDefinition, NoOpParser, Provider,
///     SplitParser, SuffixMatcher,
/// };
///
/// let provider = BasicProvider::builder()
///     .definition(LmpDefinition::new(
///         EmailSanLocator,
///         SuffixMatcher::new("@ziti.dev"),
///         SplitParser::new(".").unwrap(),
///     ))
///     .definition(LmpDefinition::new(
///         EmailSanLocator,
///         SuffixMatcher::new("@other.dev"),
///         NoOpParser,
///     ))
///     .build();
///
/// let cert = Certificate::new()
///     .with_email_address("hello@nomatch.com")
///     .with_email_address("claim1.claim2@ziti.dev")
///     .with_email_address("claim3.should.not.be.parsed@other.dev");
///
/// assert_eq!(
///     provider.claims(&cert),
///     ["claim1", "claim2", "claim3.should.not.be.parsed"]
/// );
/// ```
#[derive(Default)]
pub struct BasicProvider {
    definitions: Vec<Box<dyn Definition>>,
}

impl BasicProvider {
    /// Creates a provider from definitions, kept in the given order.
    pub fn new(definitions: Vec<Box<dyn Definition>>) -> Self {
        Self { definitions }
    }

    /// Starts a [`ProviderBuilder`].
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::new()
    }

    /// Provider extracting SPIFFE IDs from URI SANs.
    ///
    /// Returns every URI SAN with the `spiffe` scheme. SPIFFE allows a single
    /// ID per SVID; callers enforcing that should take the first claim.
    ///
    /// ```
    /// use url::Url;
    /// use x509_claims::{BasicProvider, Certificate, Provider};
    ///
    /// let cert = Certificate::new()
    ///     .with_uri(Url::parse("spiffe://mytrustdomain/myidentity").unwrap())
    ///     .with_uri(Url::parse("nomatch://not/here/man").unwrap());
    ///
    /// assert_eq!(
    ///     BasicProvider::spiffe().claims(&cert),
    ///     ["spiffe://mytrustdomain/myidentity"]
    /// );
    /// ```
    pub fn spiffe() -> Self {
        Self::builder()
            .definition(
                LmpDefinition::new(UriSanLocator, SchemeMatcher::new("spiffe"), NoOpParser)
                    .named("spiffe-id"),
            )
            .build()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the provider has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition names in order; unnamed definitions report `None`.
    pub fn definition_names(&self) -> Vec<Option<&str>> {
        self.definitions.iter().map(|d| d.name()).collect()
    }
}

impl Provider for BasicProvider {
    fn claims(&self, cert: &Certificate) -> Vec<String> {
        let claims: Vec<String> = self
            .definitions
            .iter()
            .flat_map(|definition| definition.claims(cert))
            .collect();

        tracing::debug!(
            definitions = self.definitions.len(),
            claims = claims.len(),
            "extracted claims"
        );

        claims
    }
}

impl fmt::Debug for BasicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicProvider")
            .field("definitions", &self.definition_names())
            .finish()
    }
}

/// Builder for [`BasicProvider`].
///
/// Definitions are appended in call order. Identical definitions are kept:
/// each one contributes its claims again.
#[derive(Default)]
pub struct ProviderBuilder {
    definitions: Vec<Box<dyn Definition>>,
}

impl ProviderBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a definition.
    pub fn definition(mut self, definition: impl Definition + 'static) -> Self {
        self.definitions.push(Box::new(definition));
        self
    }

    /// Appends an already boxed definition.
    pub fn boxed_definition(mut self, definition: Box<dyn Definition>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Builds the provider.
    pub fn build(self) -> BasicProvider {
        BasicProvider::new(self.definitions)
    }
}
