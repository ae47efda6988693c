//! Test fixtures and constants.

use credhub_client::{CredentialName, CredentialRequest, CredentialRequestBuilder, CredentialValue};
use serde_json::{json, Value};

/// Name used by most request tests.
pub const NAME: &str = "/c/example/credential";

/// Version id returned by canned responses.
pub const ID: &str = "67fc3def-bbfb-4953-83f8-4ab0682ad675";

/// Timestamp returned by canned responses.
pub const CREATED_AT: &str = "2017-05-04T10:20:30Z";

pub fn name() -> CredentialName {
    CredentialName::new(NAME).expect("fixture name is valid")
}

/// Builder with the standard name and `overwrite = true`.
pub fn builder(value: impl Into<CredentialValue>) -> CredentialRequestBuilder {
    CredentialRequest::builder()
        .name(name())
        .overwrite(true)
        .value(value)
}

/// A single-credential response body.
pub fn detail_response(kind: &str, value: Value) -> Value {
    json!({
        "id": ID,
        "name": NAME,
        "type": kind,
        "value": value,
        "version_created_at": CREATED_AT,
    })
}

/// A `{"data": [...]}` response body with one entry.
pub fn data_response(kind: &str, value: Value) -> Value {
    json!({ "data": [detail_response(kind, value)] })
}
