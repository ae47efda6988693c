//! credhub-client - A typed client for the CredHub credential API.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface (feature `http`)
//! │   ├── credentials   # get / set / delete
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! ├── core/             # Credential model, no I/O
//! │   ├── name          # Normalized credential paths
//! │   ├── kind          # Type tags
//! │   ├── value         # One struct per credential kind
//! │   ├── permission    # Actors and operations
//! │   ├── request       # Validated write requests and their builder
//! │   ├── details       # Response read models
//! │   └── wire          # JSON encoding and tag dispatch
//! ├── transport/        # Transport trait, options, reqwest adapter
//! ├── client            # write / get_by_id / get_by_name / delete_by_name
//! ├── config            # credhub.toml loading
//! └── error             # Error taxonomy
//! ```
//!
//! # Example
//!
//! ```
//! use credhub_client::{wire, CredentialName, CredentialRequest, SshCredential};
//!
//! let request = CredentialRequest::builder()
//!     .name(CredentialName::new("/example/credential").unwrap())
//!     .overwrite(true)
//!     .value(SshCredential::new(Some("public-key".to_string()), None))
//!     .build()
//!     .unwrap();
//!
//! let json = wire::to_wire(&request);
//! assert_eq!(json["type"], "ssh");
//! assert!(json["value"].get("private_key").is_none());
//! ```

#[cfg(feature = "http")]
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod transport;

pub use crate::client::CredHubClient;
pub use crate::core::wire;
pub use crate::core::{
    Actor, CertificateCredential, CredentialDetails, CredentialDetailsData, CredentialName,
    CredentialRequest, CredentialRequestBuilder, CredentialType, CredentialValue, JsonCredential,
    Operation, PasswordCredential, Permission, RsaCredential, SshCredential, UserCredential,
    ValueCredential,
};
pub use crate::error::{Error, Result};
pub use crate::transport::{ClientOptions, HttpRequest, HttpResponse, Method, Transport};
