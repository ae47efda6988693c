//! Configuration file management.
//!
//! Handles reading and validating `credhub.toml`.
//!
//! ```toml
//! [server]
//! url = "https://credhub.example.com:8844"
//! token = "..."            # optional bearer token
//!
//! [client]
//! connection_timeout_ms = 5000
//! read_timeout_ms = 30000
//! ca_cert_files = ["/etc/credhub/ca.pem"]
//! ```
//!
//! `CREDHUB_URL` and `CREDHUB_TOKEN` override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};
use crate::transport::ClientOptions;

/// Bearer token override.
pub const TOKEN_ENV: &str = "CREDHUB_TOKEN";

/// Client configuration stored in `credhub.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the service lives
    #[serde(default)]
    pub server: ServerConfig,
    /// Transport options
    #[serde(default)]
    pub client: ClientOptions,
}

/// The `[server]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://credhub.example.com:8844`
    #[serde(default)]
    pub url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Resolve and load the configuration.
    ///
    /// Search order: `explicit`, `./credhub.toml`, then
    /// `<config dir>/credhub/credhub.toml`. With no file found, a config
    /// built from environment variables alone is accepted if it has a URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when nothing supplies a server URL,
    /// or any error from [`Config::from_file`] and [`Config::validate`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit) {
            Some(path) => Self::from_file(&path)?,
            None if explicit.is_some() => return Err(ConfigError::NotFound.into()),
            None => Self::default(),
        };

        config.apply_env();
        if config.server.url.is_empty() {
            return Err(ConfigError::NotFound.into());
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without applying overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file can't be read or
    /// `ConfigError::Parse` if the TOML is malformed.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        debug!(url = %config.server.url, "config loaded");
        Ok(config)
    }

    /// Default location under the platform config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return path.exists().then(|| path.to_path_buf());
        }

        let local = PathBuf::from(constants::CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.exists())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(constants::URL_ENV) {
            debug!("server url overridden from environment");
            self.server.url = url;
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            self.server.token = Some(token);
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty URL or
    /// `ConfigError::InvalidValue` for a URL without an http(s) scheme.
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingField { field: "server.url" }.into());
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "server.url",
                reason: format!("expected an http(s) URL, got '{}'", url),
            }
            .into());
        }
        Ok(())
    }
}
