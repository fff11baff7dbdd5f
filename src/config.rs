//! Declarative provider configuration.
//!
//! A [`ProviderConfig`] describes a provider as data so it can be loaded from
//! a file instead of assembled in code:
//!
//! ```json
//! {
//!   "definitions": [
//!     { "name": "spiffe-id", "locator": "san-uri",
//!       "matcher": { "type": "scheme", "scheme": "spiffe" } },
//!     { "locator": "san-email",
//!       "matcher": { "type": "suffix", "suffix": "@ziti.dev" },
//!       "parser": { "type": "split", "separator": "." } }
//!   ]
//! }
//! ```
//!
//! Typed pipelines get their locator/matcher pairing checked by the compiler.
//! Here the same rule is enforced by [`ProviderConfig::build`], which compares
//! the [`ValueKind`] of each matcher with that of its locator before any stage
//! is built.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    AllMatcher, BasicProvider, ClaimValue, CommonNameLocator, ConfigError, ConfigErrorKind,
    Definition, DnsSanLocator, EmailSanLocator, LmpDefinition, Locator, Matcher, NoOpParser,
    Parser, PrefixMatcher, SchemeMatcher, SplitParser, SuffixMatcher, UriSanLocator, ValueKind,
};

type BoxedMatcher<T> = Box<dyn Matcher<T> + Send + Sync>;
type BoxedParser = Box<dyn Parser + Send + Sync>;

/// Data description of a [`BasicProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Definitions in evaluation order.
    #[serde(default)]
    pub definitions: Vec<DefinitionConfig>,
}

/// Data description of one locator → matcher → parser rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionConfig {
    /// Optional diagnostic name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Certificate field to read.
    pub locator: LocatorConfig,
    /// Defaults to [`MatcherConfig::All`].
    #[serde(default)]
    pub matcher: MatcherConfig,
    /// Defaults to [`ParserConfig::NoOp`].
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Certificate field selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorConfig {
    /// [`CommonNameLocator`]
    CommonName,
    /// [`UriSanLocator`]
    SanUri,
    /// [`EmailSanLocator`]
    SanEmail,
    /// [`DnsSanLocator`]
    SanDns,
}

impl LocatorConfig {
    /// Value kind produced by the locator.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::CommonName => kind_of::<CommonNameLocator>(),
            Self::SanUri => kind_of::<UriSanLocator>(),
            Self::SanEmail => kind_of::<EmailSanLocator>(),
            Self::SanDns => kind_of::<DnsSanLocator>(),
        }
    }
}

/// Matcher selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum MatcherConfig {
    /// [`AllMatcher`]; valid for every locator.
    All {},
    /// [`PrefixMatcher`]; text locators only.
    Prefix {
        /// Prefix to require and strip.
        prefix: String,
    },
    /// [`SuffixMatcher`]; text locators only.
    Suffix {
        /// Suffix to require and strip.
        suffix: String,
    },
    /// [`SchemeMatcher`]; the URI locator only.
    Scheme {
        /// Scheme to require.
        scheme: String,
    },
}

// Struct variants so that deny_unknown_fields also covers `{"type": "all"}`.
impl Default for MatcherConfig {
    fn default() -> Self {
        Self::All {}
    }
}

impl MatcherConfig {
    /// Value kind the matcher consumes, or `None` if it accepts any kind.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::All {} => None,
            Self::Prefix { .. } | Self::Suffix { .. } => Some(ValueKind::Text),
            Self::Scheme { .. } => Some(ValueKind::Uri),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All {} => "all",
            Self::Prefix { .. } => "prefix",
            Self::Suffix { .. } => "suffix",
            Self::Scheme { .. } => "scheme",
        }
    }

    fn text_matcher(&self) -> Option<BoxedMatcher<String>> {
        match self {
            Self::All {} => Some(Box::new(AllMatcher)),
            Self::Prefix { prefix } => Some(Box::new(PrefixMatcher::new(prefix.as_str()))),
            Self::Suffix { suffix } => Some(Box::new(SuffixMatcher::new(suffix.as_str()))),
            Self::Scheme { .. } => None,
        }
    }

    fn uri_matcher(&self) -> Option<BoxedMatcher<Url>> {
        match self {
            Self::All {} => Some(Box::new(AllMatcher)),
            Self::Scheme { scheme } => Some(Box::new(SchemeMatcher::new(scheme.as_str()))),
            Self::Prefix { .. } | Self::Suffix { .. } => None,
        }
    }
}

/// Parser selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum ParserConfig {
    /// [`NoOpParser`]
    NoOp {},
    /// [`SplitParser`]
    Split {
        /// Non-empty separator.
        separator: String,
    },
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::NoOp {}
    }
}

impl ParserConfig {
    fn build(&self) -> Result<BoxedParser, ConfigError> {
        match self {
            Self::NoOp {} => Ok(Box::new(NoOpParser)),
            Self::Split { separator } => Ok(Box::new(SplitParser::new(separator.as_str())?)),
        }
    }
}

impl ProviderConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorKind::Malformed`] if the document does not
    /// deserialize. Stage compatibility is only checked by [`build`](Self::build).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Malformed, e.to_string()))
    }

    /// Builds the provider, validating every definition in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure, prefixed with the index of the offending
    /// definition:
    /// - [`ConfigErrorKind::ValueKindMismatch`] if a matcher cannot read the
    ///   values of its locator
    /// - [`ConfigErrorKind::EmptySeparator`] if a split parser has no separator
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use x509_claims::{Certificate, ConfigErrorKind, Provider, ProviderConfig};
    ///
    /// let provider = ProviderConfig::from_json(
    ///     r#"{"definitions": [{"locator": "san-uri",
    ///                          "matcher": {"type": "scheme", "scheme": "spiffe"}}]}"#,
    /// )
    /// .unwrap()
    /// .build()
    /// .unwrap();
    ///
    /// let cert = Certificate::new().with_uri(Url::parse("spiffe://td/id").unwrap());
    /// assert_eq!(provider.claims(&cert), ["spiffe://td/id"]);
    ///
    /// let error = ProviderConfig::from_json(
    ///     r#"{"definitions": [{"locator": "san-email",
    ///                          "matcher": {"type": "scheme", "scheme": "spiffe"}}]}"#,
    /// )
    /// .unwrap()
    /// .build()
    /// .unwrap_err();
    /// assert_eq!(error.kind(), ConfigErrorKind::ValueKindMismatch);
    /// ```
    pub fn build(&self) -> Result<BasicProvider, ConfigError> {
        let definitions = self
            .definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                definition.build().map_err(|e| {
                    ConfigError::new(e.kind(), format!("definition {}: {}", index, e.message()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BasicProvider::new(definitions))
    }
}

impl DefinitionConfig {
    /// Builds this rule after checking that its stages agree on a value kind.
    ///
    /// # Errors
    ///
    /// See [`ProviderConfig::build`].
    pub fn build(&self) -> Result<Box<dyn Definition>, ConfigError> {
        let expected = self.locator.value_kind();
        if self.matcher.value_kind().is_some_and(|kind| kind != expected) {
            return Err(self.kind_mismatch());
        }
        let parser = self.parser.build()?;

        match self.locator {
            LocatorConfig::CommonName => {
                self.assemble(CommonNameLocator, self.matcher.text_matcher(), parser)
            }
            LocatorConfig::SanEmail => {
                self.assemble(EmailSanLocator, self.matcher.text_matcher(), parser)
            }
            LocatorConfig::SanDns => {
                self.assemble(DnsSanLocator, self.matcher.text_matcher(), parser)
            }
            LocatorConfig::SanUri => {
                self.assemble(UriSanLocator, self.matcher.uri_matcher(), parser)
            }
        }
    }

    fn assemble<L>(
        &self,
        locator: L,
        matcher: Option<BoxedMatcher<L::Value>>,
        parser: BoxedParser,
    ) -> Result<Box<dyn Definition>, ConfigError>
    where
        L: Locator + Send + Sync + 'static,
        L::Value: 'static,
    {
        let matcher = matcher.ok_or_else(|| self.kind_mismatch())?;

        let mut definition = LmpDefinition::new(locator, matcher, parser);
        if let Some(name) = &self.name {
            definition = definition.named(name.as_str());
        }
        Ok(Box::new(definition))
    }

    fn kind_mismatch(&self) -> ConfigError {
        ConfigError::new(
            ConfigErrorKind::ValueKindMismatch,
            format!(
                "{} matcher cannot read {} values of the {:?} locator",
                self.matcher.label(),
                self.locator.value_kind(),
                self.locator
            ),
        )
    }
}

fn kind_of<L: Locator>() -> ValueKind {
    <L::Value as ClaimValue>::KIND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Certificate, Provider};

    fn build(json: &str) -> Result<BasicProvider, ConfigError> {
        ProviderConfig::from_json(json)?.build()
    }

    #[test]
    fn defaults_are_all_matcher_and_no_op_parser() {
        let config = ProviderConfig::from_json(r#"{"definitions":[{"locator":"common-name"}]}"#)
            .unwrap();
        assert_eq!(config.definitions[0].matcher, MatcherConfig::All {});
        assert_eq!(config.definitions[0].parser, ParserConfig::NoOp {});

        let provider = config.build().unwrap();
        let cert = Certificate::new().with_common_name("some.really.long.claim");
        assert_eq!(provider.claims(&cert), ["some.really.long.claim"]);
    }

    #[test]
    fn empty_document_builds_empty_provider() {
        let provider = build("{}").unwrap();
        assert!(provider.is_empty());
    }

    #[test]
    fn full_pipeline_from_json() {
        let provider = build(
            r#"{"definitions": [
                {"name": "sentinel", "locator": "common-name",
                 "matcher": {"type": "prefix", "prefix": "SENTINEL:"},
                 "parser": {"type": "split", "separator": "."}},
                {"locator": "san-dns",
                 "matcher": {"type": "suffix", "suffix": ".svc"}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(provider.definition_names(), [Some("sentinel"), None]);

        let cert = Certificate::new()
            .with_common_name("SENTINEL:claim1.claim2")
            .with_dns_name("api.svc")
            .with_dns_name("example.com");
        assert_eq!(provider.claims(&cert), ["claim1", "claim2", "api"]);
    }

    #[test]
    fn all_matcher_is_valid_for_uri_locator() {
        let provider = build(r#"{"definitions":[{"locator":"san-uri"}]}"#).unwrap();
        let cert = Certificate::new().with_uri(Url::parse("urn:example:a").unwrap());
        assert_eq!(provider.claims(&cert), ["urn:example:a"]);
    }

    #[test]
    fn scheme_matcher_on_text_locator_is_rejected() {
        let error = build(
            r#"{"definitions":[{"locator":"common-name",
                "matcher":{"type":"scheme","scheme":"spiffe"}}]}"#,
        )
        .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::ValueKindMismatch);
        assert!(error.message().starts_with("definition 0:"));
    }

    #[test]
    fn prefix_matcher_on_uri_locator_is_rejected() {
        let error = build(
            r#"{"definitions":[
                {"locator":"san-email"},
                {"locator":"san-uri","matcher":{"type":"prefix","prefix":"spiffe://"}}]}"#,
        )
        .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::ValueKindMismatch);
        assert!(error.message().starts_with("definition 1:"));
    }

    #[test]
    fn kind_mismatch_is_reported_before_parser_errors() {
        let error = build(
            r#"{"definitions":[{"locator":"san-dns",
                "matcher":{"type":"scheme","scheme":"spiffe"},
                "parser":{"type":"split","separator":""}}]}"#,
        )
        .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::ValueKindMismatch);
        assert_eq!(
            error.message(),
            "definition 0: scheme matcher cannot read text values of the SanDns locator"
        );
    }

    #[test]
    fn stray_stage_fields_are_malformed() {
        for json in [
            r#"{"definitions":[{"locator":"common-name","matcher":{"type":"all","prefix":"SENTINEL:"}}]}"#,
            r#"{"definitions":[{"locator":"common-name","matcher":{"type":"prefix","prefix":"a","suffix":"b"}}]}"#,
            r#"{"definitions":[{"locator":"common-name","parser":{"type":"no-op","separator":"."}}]}"#,
            r#"{"definitions":[{"locator":"common-name","parser":{"type":"split","separator":".","limit":2}}]}"#,
        ] {
            let error = ProviderConfig::from_json(json).unwrap_err();
            assert_eq!(error.kind(), ConfigErrorKind::Malformed, "{json}");
        }
    }

    #[test]
    fn bare_stage_tags_still_parse() {
        let config = ProviderConfig::from_json(
            r#"{"definitions":[{"locator":"san-uri","matcher":{"type":"all"},"parser":{"type":"no-op"}}]}"#,
        )
        .unwrap();
        assert_eq!(config.definitions[0].matcher, MatcherConfig::default());
        assert_eq!(config.definitions[0].parser, ParserConfig::default());
    }

    #[test]
    fn empty_separator_is_rejected() {
        let error = build(
            r#"{"definitions":[{"locator":"san-email",
                "parser":{"type":"split","separator":""}}]}"#,
        )
        .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::EmptySeparator);
    }

    #[test]
    fn unknown_fields_are_malformed() {
        let error = ProviderConfig::from_json(r#"{"definitions":[{"locator":"common-name","x":1}]}"#)
            .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::Malformed);

        let error = ProviderConfig::from_json(r#"{"definitions":[{"locator":"subject"}]}"#)
            .unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::Malformed);
    }

    #[test]
    fn value_kinds() {
        assert_eq!(LocatorConfig::CommonName.value_kind(), ValueKind::Text);
        assert_eq!(LocatorConfig::SanUri.value_kind(), ValueKind::Uri);
        assert_eq!(LocatorConfig::SanEmail.value_kind(), ValueKind::Text);
        assert_eq!(LocatorConfig::SanDns.value_kind(), ValueKind::Text);
        assert_eq!(MatcherConfig::All {}.value_kind(), None);
        assert_eq!(
            MatcherConfig::Scheme { scheme: "spiffe".into() }.value_kind(),
            Some(ValueKind::Uri)
        );
    }

    #[test]
    fn serializes_back_to_the_same_shape() {
        let config = ProviderConfig {
            definitions: vec![DefinitionConfig {
                name: None,
                locator: LocatorConfig::SanUri,
                matcher: MatcherConfig::Scheme {
                    scheme: "spiffe".into(),
                },
                parser: ParserConfig::NoOp {},
            }],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"definitions": [{
                "locator": "san-uri",
                "matcher": {"type": "scheme", "scheme": "spiffe"},
                "parser": {"type": "no-op"}
            }]})
        );
    }
}
