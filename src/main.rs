//! credhub - Read and write credentials on a CredHub server.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credhub_client::cli::output;
use credhub_client::cli::{execute, Cli};
use credhub_client::core::constants::LOG_ENV;
use credhub_client::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credhub_client=debug")
        } else {
            EnvFilter::new("credhub_client=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound) => {
                Some("create credhub.toml with a [server] url, or set CREDHUB_URL")
            }
            Error::Status { status: 401, .. } | Error::Status { status: 403, .. } => {
                Some("check the token in credhub.toml or CREDHUB_TOKEN")
            }
            Error::Transport(_) => Some("check the server url and ca_cert_files in credhub.toml"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
