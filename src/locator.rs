use url::Url;

use crate::{Certificate, ClaimValue, Matcher};

/// Finds claim candidates in one certificate field.
///
/// A locator walks its field in certificate order, hands every candidate to
/// the matcher and keeps the string projection of each accepted (possibly
/// transformed) value. Rejected values are dropped. A locator with no
/// qualifying candidates returns an empty vector.
///
/// The associated `Value` type is what ties a locator to the matchers it can
/// be paired with: [`LmpDefinition`](crate::LmpDefinition) requires
/// `M: Matcher<L::Value>`.
pub trait Locator {
    /// The candidate value type this locator reads.
    type Value: ClaimValue;

    /// Returns the projected strings of all accepted candidates, in field order.
    fn locate(&self, cert: &Certificate, matcher: &dyn Matcher<Self::Value>) -> Vec<String>;
}

fn accepted<T, I>(candidates: I, matcher: &dyn Matcher<T>) -> Vec<String>
where
    T: ClaimValue,
    I: IntoIterator<Item = T>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| matcher.match_value(candidate).accepted())
        .map(ClaimValue::into_claim)
        .collect()
}

/// Locates the subject common name. Yields zero or one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonNameLocator;

impl Locator for CommonNameLocator {
    type Value = String;

    fn locate(&self, cert: &Certificate, matcher: &dyn Matcher<String>) -> Vec<String> {
        accepted([cert.common_name().to_string()], matcher)
    }
}

/// Locates URI subject alternative names.
///
/// Accepted URIs are projected to their canonical string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UriSanLocator;

impl Locator for UriSanLocator {
    type Value = Url;

    fn locate(&self, cert: &Certificate, matcher: &dyn Matcher<Url>) -> Vec<String> {
        accepted(cert.uris().iter().cloned(), matcher)
    }
}

/// Locates email (rfc822Name) subject alternative names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailSanLocator;

impl Locator for EmailSanLocator {
    type Value = String;

    fn locate(&self, cert: &Certificate, matcher: &dyn Matcher<String>) -> Vec<String> {
        accepted(cert.email_addresses().iter().cloned(), matcher)
    }
}

/// Locates DNS subject alternative names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DnsSanLocator;

impl Locator for DnsSanLocator {
    type Value = String;

    fn locate(&self, cert: &Certificate, matcher: &dyn Matcher<String>) -> Vec<String> {
        accepted(cert.dns_names().iter().cloned(), matcher)
    }
}
