//! Core credential model.
//!
//! Names, type tags, values, requests, responses and the JSON wire format.
//! Nothing in here performs I/O.

pub mod constants;
pub mod details;
pub mod kind;
pub mod name;
pub mod permission;
pub mod request;
pub mod value;
pub mod wire;

pub use details::{CredentialDetails, CredentialDetailsData};
pub use kind::CredentialType;
pub use name::CredentialName;
pub use permission::{Actor, Operation, Permission};
pub use request::{CredentialRequest, CredentialRequestBuilder};
pub use value::{
    CertificateCredential, CredentialValue, JsonCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
