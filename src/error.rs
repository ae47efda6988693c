//! Error types.
//!
//! One enum per concern, wrapped by [`Error`]. Every error is raised at the
//! point of violation; nothing in this crate retries.

use thiserror::Error;

/// Construction and build-time failures (the invalid-argument class).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("credential name must not be empty")]
    EmptyName,

    #[error("credential name is required")]
    MissingName,

    #[error("credential value is required")]
    MissingValue,

    #[error("{kind} credential: {field} must not be empty")]
    EmptyField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("{kind} credential: at least one of public_key/private_key must be set")]
    NoKeys { kind: &'static str },

    #[error("invalid credential id '{0}': must be non-empty without '/', '?', '#', '%' or whitespace")]
    InvalidId(String),

    #[error("invalid permission '{input}': {reason}")]
    InvalidPermission { input: String, reason: String },
}

/// Wire encoding and decoding failures.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("unknown credential type: {0}")]
    UnknownCredentialType(String),

    #[error("credential type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by the HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("failed to load CA certificate {path}: {reason}")]
    Certificate { path: String, reason: String },

    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    #[error("http error: {0}")]
    Http(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no configuration found: create credhub.toml or set CREDHUB_URL")]
    NotFound,

    #[error("failed to read config: {0}")]
    ReadFile(std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(toml::de::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("credhub returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Codec(CodecError::Json(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_to_error() {
        let err: Error = ValidationError::NoKeys { kind: "ssh" }.into();
        assert!(matches!(err, Error::Validation(ValidationError::NoKeys { .. })));
        assert_eq!(
            err.to_string(),
            "ssh credential: at least one of public_key/private_key must be set"
        );
    }

    #[test]
    fn test_status_display() {
        let err = Error::Status {
            status: 404,
            message: "The request could not be completed because the credential does not exist"
                .to_string(),
        };
        assert!(err.to_string().starts_with("credhub returned 404"));
    }
}
