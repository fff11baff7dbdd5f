//! Loading a provider from a JSON description.
//!
//! This example shows:
//! 1. Describing definitions as data
//! 2. Build-time rejection of incompatible stages
//!
//! Run with: `cargo run --example declarative_config`

use url::Url;
use x509_claims::{Certificate, Provider, ProviderConfig};

const CONFIG: &str = r#"{
  "definitions": [
    { "name": "spiffe-id", "locator": "san-uri",
      "matcher": { "type": "scheme", "scheme": "spiffe" } },
    { "name": "ziti-email", "locator": "san-email",
      "matcher": { "type": "suffix", "suffix": "@ziti.dev" },
      "parser": { "type": "split", "separator": "." } }
  ]
}"#;

const BROKEN: &str = r#"{
  "definitions": [
    { "locator": "common-name",
      "matcher": { "type": "scheme", "scheme": "spiffe" } }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Declarative Configuration Example ===\n");

    println!("--- Scenario 1: Valid Configuration ---");
    let provider = ProviderConfig::from_json(CONFIG)?.build()?;
    let cert = Certificate::new()
        .with_uri(Url::parse("spiffe://example.org/workload")?)
        .with_email_address("claim1.claim2@ziti.dev");
    println!("definitions: {:?}", provider.definition_names());
    println!("claims: {:?}", provider.claims(&cert));

    println!("\n--- Scenario 2: Incompatible Stages ---");
    match ProviderConfig::from_json(BROKEN)?.build() {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Configuration rejected (expected): {}", e),
    }

    Ok(())
}
