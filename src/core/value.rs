//! Credential values.
//!
//! One struct per credential kind, holding exactly the fields that kind's
//! payload carries, plus the [`CredentialValue`] union over all of them.
//! Constructors never fail; presence rules are checked by `validate()`,
//! which the request builder runs on every `build()`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::core::kind::CredentialType;
use crate::error::{Result, ValidationError};

/// An empty key is no key.
fn key(raw: Option<String>) -> Option<String> {
    raw.filter(|k| !k.is_empty())
}

fn require(kind: CredentialType, field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField {
            kind: kind.as_str(),
            field,
        }
        .into());
    }
    Ok(())
}

fn require_a_key(
    kind: CredentialType,
    public_key: &Option<String>,
    private_key: &Option<String>,
) -> Result<()> {
    if public_key.is_none() && private_key.is_none() {
        return Err(ValidationError::NoKeys {
            kind: kind.as_str(),
        }
        .into());
    }
    Ok(())
}

/// An arbitrary string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCredential {
    value: String,
}

impl ValueCredential {
    /// Wrap a string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The stored string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the value is empty.
    pub fn validate(&self) -> Result<()> {
        require(CredentialType::Value, "value", &self.value)
    }
}

/// A password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    password: String,
}

impl PasswordCredential {
    /// Wrap a password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// The stored password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the password is empty.
    pub fn validate(&self) -> Result<()> {
        require(CredentialType::Password, "password", &self.password)
    }
}

/// A JSON object stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCredential {
    value: Map<String, Value>,
}

impl JsonCredential {
    /// Wrap a JSON object.
    pub fn new(value: Map<String, Value>) -> Self {
        Self { value }
    }

    /// The stored object.
    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the object has no keys.
    pub fn validate(&self) -> Result<()> {
        if self.value.is_empty() {
            return Err(ValidationError::EmptyField {
                kind: CredentialType::Json.as_str(),
                field: "value",
            }
            .into());
        }
        Ok(())
    }
}

/// A username/password pair. Both halves are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCredential {
    username: Option<String>,
    password: Option<String>,
}

impl UserCredential {
    /// Pair from either or both halves.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Username, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Password, if set.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// User credentials carry no presence rule.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// An SSH keypair; either half may be omitted but not both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshCredential {
    public_key: Option<String>,
    private_key: Option<String>,
}

impl SshCredential {
    /// Keypair from either or both halves. Empty strings count as absent.
    pub fn new(public_key: Option<String>, private_key: Option<String>) -> Self {
        Self {
            public_key: key(public_key),
            private_key: key(private_key),
        }
    }

    /// Public half, if set.
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// Private half, if set.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }

    /// # Errors
    ///
    /// Returns `ValidationError::NoKeys` if both keys are absent.
    pub fn validate(&self) -> Result<()> {
        require_a_key(CredentialType::Ssh, &self.public_key, &self.private_key)
    }
}

/// An RSA keypair; same presence rule as [`SshCredential`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaCredential {
    public_key: Option<String>,
    private_key: Option<String>,
}

impl RsaCredential {
    /// Keypair from either or both halves. Empty strings count as absent.
    pub fn new(public_key: Option<String>, private_key: Option<String>) -> Self {
        Self {
            public_key: key(public_key),
            private_key: key(private_key),
        }
    }

    /// Public half, if set.
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// Private half, if set.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }

    /// # Errors
    ///
    /// Returns `ValidationError::NoKeys` if both keys are absent.
    pub fn validate(&self) -> Result<()> {
        require_a_key(CredentialType::Rsa, &self.public_key, &self.private_key)
    }
}

/// An X.509 certificate with its CA and private key.
///
/// Every field is optional. The flags are tri-state: `None` is "not set"
/// and is distinct from `Some(false)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateCredential {
    pub(crate) certificate: Option<String>,
    pub(crate) certificate_authority: Option<String>,
    pub(crate) private_key: Option<String>,
    pub(crate) certificate_authority_name: Option<String>,
    pub(crate) self_signed: Option<bool>,
    pub(crate) generated: Option<bool>,
    pub(crate) transitional: Option<bool>,
    pub(crate) expiry_date: Option<DateTime<Utc>>,
}

impl CertificateCredential {
    /// Certificate, CA and private key in one go.
    pub fn new(
        certificate: impl Into<String>,
        certificate_authority: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self::default()
            .with_certificate(certificate)
            .with_certificate_authority(certificate_authority)
            .with_private_key(private_key)
    }

    /// Set the PEM certificate.
    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    /// Set the PEM CA certificate.
    pub fn with_certificate_authority(mut self, ca: impl Into<String>) -> Self {
        self.certificate_authority = Some(ca.into());
        self
    }

    /// Set the PEM private key.
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Name of a CA credential stored on the service.
    pub fn with_certificate_authority_name(mut self, name: impl Into<String>) -> Self {
        self.certificate_authority_name = Some(name.into());
        self
    }

    /// Mark the certificate as self-signed or not.
    pub fn with_self_signed(mut self, self_signed: bool) -> Self {
        self.self_signed = Some(self_signed);
        self
    }

    /// Mark the certificate as service-generated or not.
    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = Some(generated);
        self
    }

    /// Mark the certificate as a transitional CA or not.
    pub fn with_transitional(mut self, transitional: bool) -> Self {
        self.transitional = Some(transitional);
        self
    }

    /// Set the expiry date.
    pub fn with_expiry_date(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// PEM certificate, if set.
    pub fn certificate(&self) -> Option<&str> {
        self.certificate.as_deref()
    }

    /// PEM CA certificate, if set.
    pub fn certificate_authority(&self) -> Option<&str> {
        self.certificate_authority.as_deref()
    }

    /// PEM private key, if set.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }

    /// Stored CA name, if set.
    pub fn certificate_authority_name(&self) -> Option<&str> {
        self.certificate_authority_name.as_deref()
    }

    /// Self-signed flag, if set.
    pub fn self_signed(&self) -> Option<bool> {
        self.self_signed
    }

    /// Generated flag, if set.
    pub fn generated(&self) -> Option<bool> {
        self.generated
    }

    /// Transitional flag, if set.
    pub fn transitional(&self) -> Option<bool> {
        self.transitional
    }

    /// Expiry date, if set.
    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    /// Certificate credentials carry no presence rule.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Any credential value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialValue {
    Value(ValueCredential),
    Json(JsonCredential),
    Password(PasswordCredential),
    User(UserCredential),
    Ssh(SshCredential),
    Rsa(RsaCredential),
    Certificate(CertificateCredential),
}

impl CredentialValue {
    /// The type tag this value serializes under.
    pub fn kind(&self) -> CredentialType {
        match self {
            Self::Value(_) => CredentialType::Value,
            Self::Json(_) => CredentialType::Json,
            Self::Password(_) => CredentialType::Password,
            Self::User(_) => CredentialType::User,
            Self::Ssh(_) => CredentialType::Ssh,
            Self::Rsa(_) => CredentialType::Rsa,
            Self::Certificate(_) => CredentialType::Certificate,
        }
    }

    /// Run the presence rule for this variant.
    ///
    /// # Errors
    ///
    /// Returns the variant's `ValidationError` if a required field is missing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Value(v) => v.validate(),
            Self::Json(v) => v.validate(),
            Self::Password(v) => v.validate(),
            Self::User(v) => v.validate(),
            Self::Ssh(v) => v.validate(),
            Self::Rsa(v) => v.validate(),
            Self::Certificate(v) => v.validate(),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CredentialValue {
                fn from(value: $ty) -> Self {
                    CredentialValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant! {
    Value => ValueCredential,
    Json => JsonCredential,
    Password => PasswordCredential,
    User => UserCredential,
    Ssh => SshCredential,
    Rsa => RsaCredential,
    Certificate => CertificateCredential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_ssh_requires_a_key() {
        assert!(SshCredential::new(s("public-key"), None).validate().is_ok());
        assert!(SshCredential::new(None, s("private-key")).validate().is_ok());
        assert!(matches!(
            SshCredential::new(None, None).validate(),
            Err(Error::Validation(ValidationError::NoKeys { kind: "ssh" }))
        ));
    }

    #[test]
    fn test_rsa_treats_empty_as_absent() {
        assert!(RsaCredential::new(s(""), s("")).validate().is_err());
        assert!(RsaCredential::new(s(""), None).validate().is_err());

        let rsa = RsaCredential::new(s(""), s("private-key"));
        assert!(rsa.validate().is_ok());
        assert_eq!(rsa.public_key(), None);
        assert_eq!(rsa.private_key(), Some("private-key"));
    }

    #[test]
    fn test_required_fields() {
        assert!(ValueCredential::new("secret").validate().is_ok());
        assert!(ValueCredential::new("").validate().is_err());
        assert!(PasswordCredential::new("").validate().is_err());
        assert!(JsonCredential::new(Map::new()).validate().is_err());

        let mut map = Map::new();
        map.insert("key".to_string(), Value::from(1));
        assert!(JsonCredential::new(map).validate().is_ok());
    }

    #[test]
    fn test_user_and_certificate_never_fail() {
        assert!(UserCredential::default().validate().is_ok());
        assert!(CertificateCredential::default().validate().is_ok());
    }

    #[test]
    fn test_certificate_flags_are_tristate() {
        let cert = CertificateCredential::default().with_self_signed(false);
        assert_eq!(cert.self_signed(), Some(false));
        assert_eq!(cert.generated(), None);
    }

    #[test]
    fn test_kind_follows_variant() {
        let value: CredentialValue = SshCredential::new(s("k"), None).into();
        assert_eq!(value.kind(), CredentialType::Ssh);
        let value: CredentialValue = CertificateCredential::default().into();
        assert_eq!(value.kind(), CredentialType::Certificate);
    }
}
