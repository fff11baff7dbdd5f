//! End-to-end tests for the `x509-claims` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rcgen::{CertificateParams, KeyPair, SanType};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_x509-claims"))
        .args(args)
        .output()
        .expect("failed to run x509-claims")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

fn write_cert(dir: &TempDir, name: &str, sans: Vec<SanType>) -> std::path::PathBuf {
    let mut params = CertificateParams::default();
    params.subject_alt_names = sans;
    let key = KeyPair::generate().expect("key generation");
    let cert = params.self_signed(&key).expect("self-signed certificate");

    let path = dir.path().join(name);
    fs::write(&path, cert.pem()).expect("write pem");
    path
}

#[test]
fn help_exits_zero() {
    let output = run(&["-h"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn missing_argument_exits_one() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error"));
}

#[test]
fn extra_argument_exits_one() {
    let output = run(&["a.pem", "b.pem"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.pem");

    let output = run(&[arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error reading file"));
}

#[test]
fn directory_exits_one() {
    let dir = TempDir::new().unwrap();

    let output = run(&[arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("is not a file"));
}

#[test]
fn empty_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.pem");
    fs::write(&path, b"").unwrap();

    let output = run(&[arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("0 bytes read"));
}

#[test]
fn file_without_certificates_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.pem");
    fs::write(&path, b"this is not a certificate\n").unwrap();

    let output = run(&[arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("expected at least 1 certificate got: 0"));
}

#[test]
fn prints_spiffe_ids() {
    let dir = TempDir::new().unwrap();
    let path = write_cert(
        &dir,
        "svid.pem",
        vec![
            SanType::URI("spiffe://td/workload".try_into().unwrap()),
            SanType::URI("https://example.com/".try_into().unwrap()),
        ],
    );

    let output = run(&[arg(&path)]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("...parsed 1 certificates"));
    assert!(out.contains("--- cert 1"));
    assert!(out.contains("\tspiffe://td/workload\n"));
    assert!(!out.contains("https://example.com/"));
}

#[test]
fn config_replaces_default_provider() {
    let dir = TempDir::new().unwrap();
    let cert = write_cert(
        &dir,
        "cert.pem",
        vec![
            SanType::Rfc822Name("claim1.claim2@ziti.dev".try_into().unwrap()),
            SanType::URI("spiffe://td/workload".try_into().unwrap()),
        ],
    );
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"definitions":[{"locator":"san-email",
            "matcher":{"type":"suffix","suffix":"@ziti.dev"},
            "parser":{"type":"split","separator":"."}}]}"#,
    )
    .unwrap();

    let output = run(&["--config", arg(&config), arg(&cert)]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("\tclaim1\n\tclaim2\n"));
    assert!(!out.contains("spiffe://"));
}

#[test]
fn invalid_config_exits_one() {
    let dir = TempDir::new().unwrap();
    let cert = write_cert(&dir, "cert.pem", vec![]);
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"definitions":[{"locator":"san-email","matcher":{"type":"scheme","scheme":"spiffe"}}]}"#,
    )
    .unwrap();

    let output = run(&["--config", arg(&config), arg(&cert)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("value kind mismatch"));
}
