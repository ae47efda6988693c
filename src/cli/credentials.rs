//! Credential commands: get, set, delete.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::cli::output;
use crate::client::CredHubClient;
use crate::config::Config;
use crate::core::{
    wire, CertificateCredential, CredentialName, CredentialRequest, CredentialType,
    CredentialValue, JsonCredential, PasswordCredential, Permission, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
use crate::error::{CodecError, Result};
use crate::transport::HttpTransport;

/// Raw value arguments from the command line.
#[derive(Debug, Default)]
pub struct Fields {
    pub value: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub certificate: Option<String>,
    pub ca: Option<String>,
    pub ca_name: Option<String>,
}

/// Build a client from the resolved configuration.
fn connect(config: Option<&Path>) -> Result<CredHubClient<HttpTransport>> {
    let config = Config::load(config)?;
    let mut transport = HttpTransport::new(&config.server.url, &config.client)?;
    if let Some(token) = &config.server.token {
        transport = transport.with_bearer_token(token.clone());
    }
    Ok(CredHubClient::new(transport))
}

/// Print a credential by id, or every version of it by name.
pub fn get(config: Option<&Path>, name: Option<&str>, id: Option<&str>, latest: bool) -> Result<()> {
    let client = connect(config)?;

    if let Some(id) = id {
        let details = client.get_by_id(id, None)?;
        output::json(&wire::details_to_wire(&details));
        return Ok(());
    }

    let name = CredentialName::new(name.unwrap_or_default())?;
    let data = client.get_by_name(&name, None)?;
    match data.latest() {
        Some(details) if latest => output::json(&wire::details_to_wire(details)),
        _ => output::json(&wire::data_to_wire(&data)),
    }
    Ok(())
}

/// Build, validate and write a credential.
///
/// Validation happens before any connection is attempted.
pub fn set(
    config: Option<&Path>,
    name: &str,
    kind: CredentialType,
    overwrite: bool,
    fields: Fields,
    grants: Vec<Permission>,
) -> Result<()> {
    let request = CredentialRequest::builder()
        .name(CredentialName::new(name)?)
        .overwrite(overwrite)
        .value(value_from_fields(kind, fields)?)
        .permissions(grants)
        .build()?;

    let client = connect(config)?;
    let details = client.write(&request)?;
    output::json(&wire::details_to_wire(&details));
    Ok(())
}

/// Delete every version of a credential.
pub fn delete(config: Option<&Path>, name: &str) -> Result<()> {
    let name = CredentialName::new(name)?;
    let client = connect(config)?;
    client.delete_by_name(&name)?;
    output::success(&format!("deleted {}", name));
    Ok(())
}

/// Assemble the value for `kind` from the arguments that apply to it.
///
/// Arguments that don't apply to `kind` are ignored. Missing required
/// arguments are left for the request builder to reject.
pub fn value_from_fields(kind: CredentialType, fields: Fields) -> Result<CredentialValue> {
    let value = match kind {
        CredentialType::Value => {
            ValueCredential::new(read_arg(fields.value)?.unwrap_or_default()).into()
        }
        CredentialType::Password => {
            PasswordCredential::new(read_arg(fields.password)?.unwrap_or_default()).into()
        }
        CredentialType::Json => {
            let raw = read_arg(fields.value)?.unwrap_or_else(|| "{}".to_string());
            match serde_json::from_str::<Value>(&raw).map_err(CodecError::Json)? {
                Value::Object(map) => JsonCredential::new(map).into(),
                _ => {
                    return Err(CodecError::MalformedPayload(
                        "json credential value must be an object".to_string(),
                    )
                    .into())
                }
            }
        }
        CredentialType::User => {
            UserCredential::new(read_arg(fields.username)?, read_arg(fields.password)?).into()
        }
        CredentialType::Ssh => {
            SshCredential::new(read_arg(fields.public_key)?, read_arg(fields.private_key)?).into()
        }
        CredentialType::Rsa => {
            RsaCredential::new(read_arg(fields.public_key)?, read_arg(fields.private_key)?).into()
        }
        CredentialType::Certificate => {
            let mut cert = CertificateCredential::default();
            if let Some(certificate) = read_arg(fields.certificate)? {
                cert = cert.with_certificate(certificate);
            }
            if let Some(ca) = read_arg(fields.ca)? {
                cert = cert.with_certificate_authority(ca);
            }
            if let Some(key) = read_arg(fields.private_key)? {
                cert = cert.with_private_key(key);
            }
            if let Some(ca_name) = read_arg(fields.ca_name)? {
                cert = cert.with_certificate_authority_name(ca_name);
            }
            cert.into()
        }
    };
    Ok(value)
}

/// `@path` reads the argument from a file.
fn read_arg(arg: Option<String>) -> Result<Option<String>> {
    match arg {
        Some(raw) => match raw.strip_prefix('@') {
            Some(path) => {
                debug!(path = %path, "reading argument from file");
                Ok(Some(std::fs::read_to_string(path)?))
            }
            None => Ok(Some(raw)),
        },
        None => Ok(None),
    }
}
