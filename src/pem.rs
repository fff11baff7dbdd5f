//! PEM/DER decoding boundary.
//!
//! Turns encoded certificate bytes into [`Certificate`] views. Anything that
//! does not decode as an X.509 certificate is dropped here, so the extraction
//! pipeline only ever sees well-formed input.

use der::Decode;
use rustls_pemfile::Item;

use crate::Certificate;

/// Decodes every `CERTIFICATE` block in `pem`, in file order.
///
/// Blocks of other types (keys, CRLs, ...), malformed PEM sections and
/// certificates that fail DER decoding are discarded. An input without any
/// decodable certificate yields an empty vector.
///
/// # Examples
///
/// ```
/// use x509_claims::pem::certificates_from_pem;
///
/// let certs = certificates_from_pem(b"not a pem file");
/// assert!(certs.is_empty());
/// ```
pub fn certificates_from_pem(pem: &[u8]) -> Vec<Certificate> {
    sections(pem)
        .filter_map(|mut section| match rustls_pemfile::read_one(&mut section) {
            Ok(Some(Item::X509Certificate(der))) => certificate_from_der(der.as_ref()),
            Ok(_) => None,
            Err(error) => {
                tracing::debug!(%error, "discarding malformed PEM section");
                None
            }
        })
        .collect()
}

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";

/// Splits `pem` at every BEGIN line so that an unterminated or mislabelled
/// section cannot swallow the sections after it.
fn sections(pem: &[u8]) -> impl Iterator<Item = &[u8]> {
    let starts: Vec<usize> = pem
        .windows(BEGIN_MARKER.len())
        .enumerate()
        .filter(|(_, window)| *window == BEGIN_MARKER)
        .map(|(offset, _)| offset)
        .collect();

    let ends: Vec<usize> = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(pem.len()))
        .collect();

    starts
        .into_iter()
        .zip(ends)
        .map(move |(start, end)| &pem[start..end])
}

/// Decodes one DER-encoded certificate, or `None` if it is not one.
pub fn certificate_from_der(der: &[u8]) -> Option<Certificate> {
    match x509_cert::Certificate::from_der(der) {
        Ok(cert) => Some(Certificate::from(&cert)),
        Err(error) => {
            tracing::debug!(%error, len = der.len(), "discarding undecodable certificate");
            None
        }
    }
}
