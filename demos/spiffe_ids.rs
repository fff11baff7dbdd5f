//! Composing extraction rules in code.
//!
//! This example shows:
//! 1. Pulling SPIFFE IDs out of URI SANs
//! 2. Turning a sentinel-prefixed common name into several claims
//! 3. Combining rules over different fields in one provider
//!
//! Run with: `cargo run --example spiffe_ids`

use url::Url;
use x509_claims::{
    BasicProvider, Certificate, CommonNameLocator, EmailSanLocator, LmpDefinition, PrefixMatcher,
    Provider, SplitParser, SuffixMatcher,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SPIFFE ID Extraction Example ===\n");

    let cert = Certificate::new()
        .with_common_name("SENTINEL:admin.operator")
        .with_uri(Url::parse("spiffe://example.org/ns/prod/sa/api")?)
        .with_uri(Url::parse("https://example.org/profile")?)
        .with_email_address("billing.reports@ziti.dev")
        .with_email_address("someone@elsewhere.com");

    // Scenario 1: the canonical SPIFFE provider
    println!("--- Scenario 1: SPIFFE IDs ---");
    for claim in BasicProvider::spiffe().claims(&cert) {
        println!("claim: {}", claim);
    }

    // Scenario 2: common name with a sentinel prefix
    println!("\n--- Scenario 2: Sentinel Common Name ---");
    let roles = BasicProvider::builder()
        .definition(
            LmpDefinition::new(
                CommonNameLocator,
                PrefixMatcher::new("SENTINEL:"),
                SplitParser::new(".")?,
            )
            .named("roles"),
        )
        .build();
    println!("claims: {:?}", roles.claims(&cert));

    // Scenario 3: several fields, claims reported in definition order
    println!("\n--- Scenario 3: Combined Provider ---");
    let combined = BasicProvider::builder()
        .boxed_definition(Box::new(
            LmpDefinition::new(
                EmailSanLocator,
                SuffixMatcher::new("@ziti.dev"),
                SplitParser::new(".")?,
            )
            .named("ziti-email"),
        ))
        .definition(LmpDefinition::new(
            CommonNameLocator,
            PrefixMatcher::new("SENTINEL:"),
            SplitParser::new(".")?,
        ))
        .build();
    println!("definitions: {:?}", combined.definition_names());
    println!("claims: {:?}", combined.claims(&cert));

    Ok(())
}
