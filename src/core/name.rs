//! Credential name.
//!
//! A credential is addressed by an opaque path that always starts with `/`.

use crate::core::constants::SEPARATOR;
use crate::error::{Result, ValidationError};

/// A normalized credential path (e.g. `/c/my-app/db-password`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialName(String);

impl CredentialName {
    /// Normalize a raw name.
    ///
    /// Leading separators are collapsed to exactly one; the remainder of the
    /// path is kept as given.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if `raw` is empty or contains
    /// nothing but separators.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim_start_matches(SEPARATOR);
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self(format!("{}{}", SEPARATOR, trimmed)))
    }

    /// Build a name from path segments, skipping empty ones.
    ///
    /// `["example", "credential"]` becomes `/example/credential`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if every segment is empty.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().trim_matches(SEPARATOR).to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());
        Self::new(joined)
    }

    /// The normalized path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CredentialName {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for CredentialName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
