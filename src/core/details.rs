//! Credential read models returned by the service.

use chrono::{DateTime, Utc};

use crate::core::kind::CredentialType;
use crate::core::name::CredentialName;
use crate::core::value::CredentialValue;

/// A single stored credential version.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDetails {
    id: String,
    name: CredentialName,
    value: CredentialValue,
    version_created_at: Option<DateTime<Utc>>,
}

impl CredentialDetails {
    /// A version without a creation time.
    pub fn new(id: impl Into<String>, name: CredentialName, value: CredentialValue) -> Self {
        Self {
            id: id.into(),
            name,
            value,
            version_created_at: None,
        }
    }

    /// Set when this version was created.
    pub fn with_version_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.version_created_at = Some(at);
        self
    }

    /// Service-assigned version id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Credential name.
    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    /// Always matches the shape of [`value`](Self::value).
    pub fn kind(&self) -> CredentialType {
        self.value.kind()
    }

    /// Decoded value.
    pub fn value(&self) -> &CredentialValue {
        &self.value
    }

    /// When this version was created, if reported.
    pub fn version_created_at(&self) -> Option<DateTime<Utc>> {
        self.version_created_at
    }
}

/// The `data` list returned by name lookups, newest version first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialDetailsData {
    data: Vec<CredentialDetails>,
}

impl CredentialDetailsData {
    /// Wrap versions ordered newest first.
    pub fn new(data: Vec<CredentialDetails>) -> Self {
        Self { data }
    }

    /// All versions, newest first.
    pub fn data(&self) -> &[CredentialDetails] {
        &self.data
    }

    /// The most recent version, if any.
    pub fn latest(&self) -> Option<&CredentialDetails> {
        self.data.first()
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no versions were returned.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl IntoIterator for CredentialDetailsData {
    type Item = CredentialDetails;
    type IntoIter = std::vec::IntoIter<CredentialDetails>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
