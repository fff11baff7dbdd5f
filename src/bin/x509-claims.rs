//! x509-claims - print the claims found in the certificates of a PEM file.
//!
//! Uses the SPIFFE ID provider unless `--config` points at a JSON
//! [`ProviderConfig`]. Diagnostics go to stderr and are filtered with
//! `RUST_LOG`; results and errors are written to stdout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser as _;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use x509_claims::pem::certificates_from_pem;
use x509_claims::{BasicProvider, ConfigError, Provider, ProviderConfig};

#[derive(clap::Parser, Debug)]
#[command(name = "x509-claims", version)]
#[command(
    about = "Example implementation of x509-claims: parses SPIFFE IDs out of X.509 certificates",
    long_about = None
)]
struct Cli {
    /// PEM file containing one or more certificates
    cert_pem_file: PathBuf,

    /// JSON provider configuration to use instead of the SPIFFE ID provider
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error reading file {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("error reading file {0}: is not a file")]
    NotAFile(String),

    #[error("error reading file {0}: 0 bytes read")]
    Empty(String),

    #[error("error parsing certificates, expected at least 1 certificate got: 0")]
    NoCertificates,

    #[error("error loading config {path}: {source}")]
    Config { path: String, source: ConfigError },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            print!("{}", err);
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "x509-claims failed");
            println!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let provider = match &cli.config {
        Some(path) => load_provider(path)?,
        None => BasicProvider::spiffe(),
    };

    let bytes = read_input(&cli.cert_pem_file)?;
    let certs = certificates_from_pem(&bytes);
    if certs.is_empty() {
        return Err(CliError::NoCertificates);
    }

    println!("...parsed {} certificates", certs.len());

    for (i, cert) in certs.iter().enumerate() {
        println!("\n--- cert {}", i + 1);
        for claim in provider.claims(cert) {
            println!("\t{}", claim);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    let display = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    if metadata.is_dir() {
        return Err(CliError::NotAFile(display));
    }

    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(CliError::Empty(display));
    }

    Ok(bytes)
}

fn load_provider(path: &Path) -> Result<BasicProvider, CliError> {
    let display = path.display().to_string();
    let json = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;

    let provider = ProviderConfig::from_json(&json)
        .and_then(|config| config.build())
        .map_err(|source| CliError::Config {
            path: display,
            source,
        })?;

    tracing::debug!(definitions = provider.len(), "loaded provider configuration");
    Ok(provider)
}
