//! Configuration source identifiers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Broad category of a configuration origin, inferred from its location.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Content fetched over HTTP or HTTPS.
    Http,
    /// Content read from the local filesystem.
    File,
    /// Anything else, typically content supplied in-process.
    Inline,
}

impl SourceKind {
    fn infer(location: &str) -> Self {
        let scheme = location
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase());
        match scheme.as_deref() {
            Some("http" | "https") => Self::Http,
            Some("file") => Self::File,
            Some(_) => Self::Inline,
            None if location.starts_with('/') || location.starts_with('.') => Self::File,
            None => Self::Inline,
        }
    }
}

/// Opaque identifier for a configuration origin, such as a network location.
///
/// The identifier is carried around for display purposes only; nothing in this
/// crate resolves or dereferences it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigurationSource {
    kind: SourceKind,
    location: String,
}

impl ConfigurationSource {
    /// Creates a source from a location string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySource`] when the location is empty or whitespace.
    pub fn new(location: impl Into<String>) -> crate::Result<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(Error::EmptySource);
        }
        Ok(Self {
            kind: SourceKind::infer(&location),
            location,
        })
    }

    /// Returns the inferred source kind.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Returns the raw location string.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns `true` when the source is fetched over HTTP(S).
    #[must_use]
    pub const fn is_http(&self) -> bool {
        matches!(self.kind, SourceKind::Http)
    }
}

impl Display for ConfigurationSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

impl FromStr for ConfigurationSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ConfigurationSource {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfigurationSource> for String {
    fn from(value: ConfigurationSource) -> Self {
        value.location
    }
}
