//! Command-line interface.

pub mod completions;
pub mod credentials;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::{CredentialType, Permission};

/// credhub - Read and write credentials on a CredHub server.
#[derive(Parser)]
#[command(
    name = "credhub",
    about = "Read and write credentials on a CredHub server",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to credhub.toml
    #[arg(short, long, global = true, env = "CREDHUB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch a credential by name (all versions) or by version id
    Get {
        /// Credential name
        #[arg(short, long, conflicts_with = "id", required_unless_present = "id")]
        name: Option<String>,
        /// Version id
        #[arg(long)]
        id: Option<String>,
        /// Only print the latest version
        #[arg(long)]
        latest: bool,
    },

    /// Write a credential
    ///
    /// Arguments starting with '@' are read from the named file.
    Set {
        /// Credential name
        #[arg(short, long)]
        name: String,
        /// Credential type
        #[arg(short = 't', long = "type", value_parser = parse_kind)]
        kind: CredentialType,
        /// Replace an existing credential
        #[arg(long)]
        overwrite: bool,
        /// Value (value type) or JSON object (json type)
        #[arg(long)]
        value: Option<String>,
        /// Username (user type)
        #[arg(long)]
        username: Option<String>,
        /// Password (password and user types)
        #[arg(short, long)]
        password: Option<String>,
        /// Public key (ssh and rsa types)
        #[arg(long)]
        public_key: Option<String>,
        /// Private key (ssh, rsa and certificate types)
        #[arg(long)]
        private_key: Option<String>,
        /// PEM certificate (certificate type)
        #[arg(long)]
        certificate: Option<String>,
        /// PEM CA certificate (certificate type)
        #[arg(long)]
        ca: Option<String>,
        /// Name of a CA stored on the server (certificate type)
        #[arg(long)]
        ca_name: Option<String>,
        /// Grant access, e.g. mtls-app:<guid>=read,write (repeatable)
        #[arg(short, long = "grant", value_parser = parse_permission)]
        grants: Vec<Permission>,
    },

    /// Delete a credential and all of its versions
    Delete {
        /// Credential name
        #[arg(short, long)]
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

fn parse_kind(s: &str) -> std::result::Result<CredentialType, String> {
    s.parse().map_err(|e: crate::error::CodecError| e.to_string())
}

fn parse_permission(s: &str) -> std::result::Result<Permission, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    use Command::*;

    let config = cli.config.as_deref();
    match cli.command {
        Get { name, id, latest } => credentials::get(config, name.as_deref(), id.as_deref(), latest),
        Set {
            name,
            kind,
            overwrite,
            value,
            username,
            password,
            public_key,
            private_key,
            certificate,
            ca,
            ca_name,
            grants,
        } => {
            let fields = credentials::Fields {
                value,
                username,
                password,
                public_key,
                private_key,
                certificate,
                ca,
                ca_name,
            };
            credentials::set(config, &name, kind, overwrite, fields, grants)
        }
        Delete { name } => credentials::delete(config, &name),
        Completions { shell } => completions::execute(shell),
    }
}
