//! Transport options.
//!
//! Read from the `[client]` table of `credhub.toml`:
//!
//! ```toml
//! [client]
//! connection_timeout_ms = 5000
//! read_timeout_ms = 30000
//! ca_cert_files = ["/etc/credhub/ca.pem"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Timeouts and trust material for the HTTP transport.
///
/// Unset timeouts fall back to the transport's defaults. Setting
/// `ca_cert_files` replaces the built-in root store with the given PEM files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    #[serde(
        default,
        rename = "connection_timeout_ms",
        with = "millis",
        skip_serializing_if = "Option::is_none"
    )]
    connection_timeout: Option<Duration>,

    #[serde(
        default,
        rename = "read_timeout_ms",
        with = "millis",
        skip_serializing_if = "Option::is_none"
    )]
    read_timeout: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    ca_cert_files: Option<Vec<PathBuf>>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_ca_cert_files(mut self, files: Vec<PathBuf>) -> Self {
        self.ca_cert_files = Some(files);
        self
    }

    pub fn connection_timeout(&self) -> Option<Duration> {
        self.connection_timeout
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    pub fn ca_cert_files(&self) -> Option<&[PathBuf]> {
        self.ca_cert_files.as_deref()
    }

    /// Whether custom trust material replaces the default roots.
    pub fn uses_custom_certs(&self) -> bool {
        self.ca_cert_files.is_some()
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_u64(d.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
