use der::asn1::{
    BmpString, Ia5StringRef, ObjectIdentifier, PrintableStringRef, TeletexStringRef, Utf8StringRef,
};
use der::Decode;
use url::Url;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::SubjectAltName;

const COMMON_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const SUBJECT_ALT_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Read-only view of the certificate fields claims are extracted from.
///
/// The extraction pipeline only ever reads these fields. Callers holding an
/// already-trusted [`x509_cert::Certificate`] convert it with `From`; tests and
/// callers with pre-decoded data build one directly.
///
/// # Examples
///
/// ```
/// use x509_claims::Certificate;
///
/// let cert = Certificate::new()
///     .with_common_name("SENTINEL:claim1.claim2")
///     .with_email_address("claim3@ziti.dev");
///
/// assert_eq!(cert.common_name(), "SENTINEL:claim1.claim2");
/// assert_eq!(cert.email_addresses(), ["claim3@ziti.dev"]);
/// assert!(cert.uris().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    common_name: String,
    uris: Vec<Url>,
    email_addresses: Vec<String>,
    dns_names: Vec<String>,
}

impl Certificate {
    /// Creates a certificate view with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subject common name.
    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = common_name.into();
        self
    }

    /// Appends a URI subject alternative name.
    pub fn with_uri(mut self, uri: Url) -> Self {
        self.uris.push(uri);
        self
    }

    /// Appends an email (rfc822Name) subject alternative name.
    pub fn with_email_address(mut self, email: impl Into<String>) -> Self {
        self.email_addresses.push(email.into());
        self
    }

    /// Appends a DNS subject alternative name.
    pub fn with_dns_name(mut self, name: impl Into<String>) -> Self {
        self.dns_names.push(name.into());
        self
    }

    /// The subject common name, empty if the subject has none.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// URI SANs in certificate order.
    pub fn uris(&self) -> &[Url] {
        &self.uris
    }

    /// Email SANs in certificate order.
    pub fn email_addresses(&self) -> &[String] {
        &self.email_addresses
    }

    /// DNS SANs in certificate order.
    pub fn dns_names(&self) -> &[String] {
        &self.dns_names
    }
}

impl From<&x509_cert::Certificate> for Certificate {
    fn from(cert: &x509_cert::Certificate) -> Self {
        let tbs = &cert.tbs_certificate;
        let mut view = Certificate {
            common_name: common_name(&tbs.subject).unwrap_or_default(),
            ..Certificate::default()
        };

        let Some(extensions) = &tbs.extensions else {
            return view;
        };

        for ext in extensions.iter().filter(|e| e.extn_id == SUBJECT_ALT_NAME_OID) {
            let san = match SubjectAltName::from_der(ext.extn_value.as_bytes()) {
                Ok(san) => san,
                Err(error) => {
                    tracing::debug!(%error, "ignoring undecodable subjectAltName extension");
                    continue;
                }
            };

            for name in san.0 {
                match name {
                    GeneralName::UniformResourceIdentifier(uri) => {
                        match Url::parse(&uri.to_string()) {
                            Ok(parsed) => view.uris.push(parsed),
                            Err(error) => {
                                tracing::debug!(uri = %uri, %error, "skipping unparseable URI SAN")
                            }
                        }
                    }
                    GeneralName::Rfc822Name(email) => {
                        view.email_addresses.push(email.to_string())
                    }
                    GeneralName::DnsName(dns) => view.dns_names.push(dns.to_string()),
                    _ => {}
                }
            }
        }

        view
    }
}

impl From<x509_cert::Certificate> for Certificate {
    fn from(cert: x509_cert::Certificate) -> Self {
        Self::from(&cert)
    }
}

/// Last commonName attribute in the subject; later RDNs override earlier ones.
///
/// Printable, UTF-8, IA5, Teletex and BMP encodings are read. A CN in any
/// other string type is skipped.
fn common_name(name: &x509_cert::name::Name) -> Option<String> {
    let mut found = None;
    for rdn in &name.0 {
        for atv in rdn.0.iter().filter(|atv| atv.oid == COMMON_NAME_OID) {
            let value = if let Ok(s) = PrintableStringRef::try_from(&atv.value) {
                Some(s.to_string())
            } else if let Ok(s) = Utf8StringRef::try_from(&atv.value) {
                Some(s.to_string())
            } else if let Ok(s) = Ia5StringRef::try_from(&atv.value) {
                Some(s.to_string())
            } else if let Ok(s) = atv.value.decode_as::<TeletexStringRef<'_>>() {
                Some(s.to_string())
            } else if let Ok(s) = atv.value.decode_as::<BmpString>() {
                Some(s.to_string())
            } else {
                None
            };

            if value.is_some() {
                found = value;
            }
        }
    }
    found
}
