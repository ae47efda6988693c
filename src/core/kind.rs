//! Credential type tag.

use crate::error::CodecError;

/// The discriminator carried in the `type` key of every request and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialType {
    Value,
    Json,
    Password,
    User,
    Ssh,
    Rsa,
    Certificate,
}

impl CredentialType {
    /// Every known type, in wire-tag order.
    pub const ALL: [CredentialType; 7] = [
        CredentialType::Value,
        CredentialType::Json,
        CredentialType::Password,
        CredentialType::User,
        CredentialType::Ssh,
        CredentialType::Rsa,
        CredentialType::Certificate,
    ];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Json => "json",
            Self::Password => "password",
            Self::User => "user",
            Self::Ssh => "ssh",
            Self::Rsa => "rsa",
            Self::Certificate => "certificate",
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CredentialType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CodecError::UnknownCredentialType(s.to_string()))
    }
}
