//! Credential write requests.
//!
//! A [`CredentialRequest`] is only obtainable from
//! [`CredentialRequestBuilder::build`], so every request in circulation has
//! a name, a value and has passed its variant's presence rule.

use tracing::debug;

use crate::core::kind::CredentialType;
use crate::core::name::CredentialName;
use crate::core::permission::Permission;
use crate::core::value::CredentialValue;
use crate::error::{Result, ValidationError};

/// A validated request to write a credential.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRequest {
    name: CredentialName,
    overwrite: bool,
    value: CredentialValue,
    additional_permissions: Vec<Permission>,
}

impl CredentialRequest {
    /// Start a new draft.
    pub fn builder() -> CredentialRequestBuilder {
        CredentialRequestBuilder::default()
    }

    /// Normalized credential name.
    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    /// Whether an existing credential is replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Derived from the value; not settable on its own.
    pub fn kind(&self) -> CredentialType {
        self.value.kind()
    }

    /// The value being written.
    pub fn value(&self) -> &CredentialValue {
        &self.value
    }

    /// Permissions granted alongside the write, in insertion order.
    pub fn additional_permissions(&self) -> &[Permission] {
        &self.additional_permissions
    }
}

/// Mutable draft of a [`CredentialRequest`].
#[derive(Debug, Clone, Default)]
pub struct CredentialRequestBuilder {
    name: Option<CredentialName>,
    overwrite: bool,
    value: Option<CredentialValue>,
    additional_permissions: Vec<Permission>,
}

impl CredentialRequestBuilder {
    /// Set the credential name.
    pub fn name(mut self, name: CredentialName) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the value; its variant decides the request's type.
    pub fn value(mut self, value: impl Into<CredentialValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Replace an existing credential of the same name. Defaults to `false`.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Append one permission.
    pub fn permission(mut self, permission: Permission) -> Self {
        self.additional_permissions.push(permission);
        self
    }

    /// Append several permissions, keeping their order.
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.additional_permissions.extend(permissions);
        self
    }

    /// Validate the draft and produce a request.
    ///
    /// Validation runs on every call against the current draft.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingName` or `ValidationError::MissingValue`
    /// if either is unset, or the value's own validation error.
    pub fn build(&self) -> Result<CredentialRequest> {
        let name = self.name.clone().ok_or(ValidationError::MissingName)?;
        let value = self.value.clone().ok_or(ValidationError::MissingValue)?;
        value.validate()?;

        debug!(
            name = %name,
            kind = %value.kind(),
            overwrite = self.overwrite,
            permissions = self.additional_permissions.len(),
            "credential request built"
        );

        Ok(CredentialRequest {
            name,
            overwrite: self.overwrite,
            value,
            additional_permissions: self.additional_permissions.clone(),
        })
    }
}
