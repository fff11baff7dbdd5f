//! Declarative claim extraction from trusted X.509 certificates.
//!
//! This crate pulls identity "claims" (SPIFFE IDs, domain identifiers, any
//! string a deployment cares about) out of certificate fields. It does not
//! verify signatures or chains of trust: certificates handed to it are
//! expected to be trusted already.
//!
//! Extraction is described, not coded, as a pipeline of three stages:
//! - **Locate**: a [`Locator`] reads candidates from one certificate field
//! - **Match**: a [`Matcher`] keeps claim-bearing candidates and may strip
//!   sentinel prefixes or suffixes
//! - **Parse**: a [`Parser`] splits each matched value into claims
//!
//! An [`LmpDefinition`] binds one of each stage into a rule, and a
//! [`BasicProvider`] runs an ordered list of rules. Every stage is a total
//! function: "no match" and "no claims" are ordinary results.
//!
//! # Core Types
//!
//! - [`Certificate`]: read-only field view the pipeline consumes
//! - [`Provider`] / [`BasicProvider`]: ordered claims sources
//! - [`Definition`] / [`LmpDefinition`]: individual extraction rules
//! - [`ProviderConfig`]: the same pipelines described as data
//!
//! # Examples
//!
//! ```
//! use url::Url;
//! use x509_claims::{
//!     BasicProvider, Certificate, CommonNameLocator, LmpDefinition, PrefixMatcher, Provider,
//!     SplitParser,
//! };
//!
//! let provider = BasicProvider::builder()
//!     .definition(LmpDefinition::new(
//!         CommonNameLocator,
//!         PrefixMatcher::new("SENTINEL:"),
//!         SplitParser::new(".").unwrap(),
//!     ))
//!     .build();
//!
//! let cert = Certificate::new().with_common_name("SENTINEL:claim1.claim2.claim3");
//! assert_eq!(provider.claims(&cert), ["claim1", "claim2", "claim3"]);
//!
//! // A prefix mismatch suppresses the whole field.
//! let cert = Certificate::new().with_common_name("IGOBOOM:claim1.claim2.claim3");
//! assert!(provider.claims(&cert).is_empty());
//! ```
//!
//! Decoding real certificates goes through [`pem::certificates_from_pem`]:
//!
//! ```no_run
//! use x509_claims::{pem::certificates_from_pem, BasicProvider, Provider};
//!
//! let bytes = std::fs::read("svid.pem").unwrap();
//! let provider = BasicProvider::spiffe();
//! for cert in certificates_from_pem(&bytes) {
//!     println!("{:?}", provider.claims(&cert));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod certificate;
pub mod config;
mod definition;
mod error;
mod locator;
mod matcher;
mod parser;
pub mod pem;
mod provider;
mod value;

pub use certificate::Certificate;
pub use config::{DefinitionConfig, LocatorConfig, MatcherConfig, ParserConfig, ProviderConfig};
pub use definition::{Definition, LmpDefinition};
pub use error::{ConfigError, ConfigErrorKind};
pub use locator::{CommonNameLocator, DnsSanLocator, EmailSanLocator, Locator, UriSanLocator};
pub use matcher::{AllMatcher, Match, Matcher, PrefixMatcher, SchemeMatcher, SuffixMatcher};
pub use parser::{NoOpParser, Parser, SplitParser};
pub use provider::{BasicProvider, Provider, ProviderBuilder};
pub use value::{ClaimValue, ValueKind};
