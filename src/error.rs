use std::fmt;

use thiserror::Error;

/// Error raised while assembling an extraction pipeline.
///
/// Claim extraction itself never fails; every error in this crate surfaces
/// while a parser, definition or provider is being configured.
///
/// # Examples
///
/// ```
/// use x509_claims::{ConfigError, ConfigErrorKind};
///
/// let error = ConfigError::new(ConfigErrorKind::EmptySeparator, "separator must not be empty");
/// assert_eq!(error.kind(), ConfigErrorKind::EmptySeparator);
/// assert_eq!(
///     error.to_string(),
///     "invalid configuration (empty separator): separator must not be empty"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration ({kind}): {message}")]
pub struct ConfigError {
    kind: ConfigErrorKind,
    message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Kind of configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A split parser was given an empty separator.
    EmptySeparator,
    /// A matcher was paired with a locator producing a different value kind.
    ValueKindMismatch,
    /// A configuration document could not be deserialized.
    Malformed,
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeparator => write!(f, "empty separator"),
            Self::ValueKindMismatch => write!(f, "value kind mismatch"),
            Self::Malformed => write!(f, "malformed document"),
        }
    }
}
