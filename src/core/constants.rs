//! Constants used throughout the client.
//!
//! Centralizes API paths, file names and environment variable names.

/// Separator between credential name segments.
pub const SEPARATOR: char = '/';

/// Data endpoint for credential reads and writes.
pub const DATA_PATH: &str = "/api/v1/data";

/// Configuration file name (credhub.toml).
pub const CONFIG_FILE: &str = "credhub.toml";

/// Directory under the platform config dir that holds the config file.
pub const CONFIG_DIR: &str = "credhub";

/// Overrides the server URL from the config file.
pub const URL_ENV: &str = "CREDHUB_URL";

/// Log filter for the binary.
pub const LOG_ENV: &str = "CREDHUB_LOG";
