//! JSON wire format.
//!
//! Encoding is explicit: every optional field is checked for presence and
//! written only when set, so an unset field never shows up as `null` or
//! `""`. Decoding dispatches on the envelope's `type` tag through
//! [`decoder`], the single place that maps a tag to a payload shape.
//!
//! Encoding needs no table: [`encode_value`] matches on the
//! [`CredentialValue`] variant, which already carries its kind. Only
//! decoding starts from a bare tag, so only decoding goes through one.
//!
//! Wire keys are snake_case. Value and password credentials travel as a
//! bare string in `value`; the decoder also accepts the object forms
//! `{"value": ...}` and `{"password": ...}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::details::{CredentialDetails, CredentialDetailsData};
use crate::core::kind::CredentialType;
use crate::core::name::CredentialName;
use crate::core::permission::{Actor, Operation, Permission};
use crate::core::request::CredentialRequest;
use crate::core::value::{
    CertificateCredential, CredentialValue, JsonCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
use crate::error::{CodecError, Result};

type Decode = fn(&Value) -> std::result::Result<CredentialValue, CodecError>;

/// Render a request as its wire object.
pub fn to_wire(request: &CredentialRequest) -> Value {
    let mut envelope = Map::new();
    envelope.insert("name".to_string(), Value::from(request.name().as_str()));
    envelope.insert("type".to_string(), Value::from(request.kind().as_str()));
    envelope.insert("overwrite".to_string(), Value::from(request.overwrite()));
    envelope.insert("value".to_string(), encode_value(request.value()));

    if !request.additional_permissions().is_empty() {
        let permissions = request
            .additional_permissions()
            .iter()
            .map(encode_permission)
            .collect();
        envelope.insert("additional_permissions".to_string(), Value::Array(permissions));
    }

    debug!(name = %request.name(), kind = %request.kind(), "encoded credential request");
    Value::Object(envelope)
}

/// Render a request as a compact JSON string.
pub fn to_json(request: &CredentialRequest) -> String {
    to_wire(request).to_string()
}

/// Encode just the `value` part of an envelope.
pub fn encode_value(value: &CredentialValue) -> Value {
    match value {
        CredentialValue::Value(v) => Value::from(v.value()),
        CredentialValue::Password(v) => Value::from(v.password()),
        CredentialValue::Json(v) => Value::Object(v.value().clone()),
        CredentialValue::User(v) => Fields::default()
            .string("username", v.username())
            .string("password", v.password())
            .finish(),
        CredentialValue::Ssh(v) => Fields::default()
            .string("public_key", v.public_key())
            .string("private_key", v.private_key())
            .finish(),
        CredentialValue::Rsa(v) => Fields::default()
            .string("public_key", v.public_key())
            .string("private_key", v.private_key())
            .finish(),
        CredentialValue::Certificate(v) => Fields::default()
            .string("certificate", v.certificate())
            .string("certificate_authority", v.certificate_authority())
            .string("private_key", v.private_key())
            .string("certificate_authority_name", v.certificate_authority_name())
            .flag("self_signed", v.self_signed())
            .flag("generated", v.generated())
            .flag("transitional", v.transitional())
            .timestamp("expiry_date", v.expiry_date())
            .finish(),
    }
}

/// Render a stored credential the way the service returns it.
pub fn details_to_wire(details: &CredentialDetails) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), Value::from(details.id()));
    object.insert("name".to_string(), Value::from(details.name().as_str()));
    object.insert("type".to_string(), Value::from(details.kind().as_str()));
    object.insert("value".to_string(), encode_value(details.value()));
    if let Some(at) = details.version_created_at() {
        object.insert(
            "version_created_at".to_string(),
            Value::from(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
    }
    Value::Object(object)
}

/// Render a list response as `{"data": [...]}`.
pub fn data_to_wire(data: &CredentialDetailsData) -> Value {
    let items = data.data().iter().map(details_to_wire).collect();
    let mut object = Map::new();
    object.insert("data".to_string(), Value::Array(items));
    Value::Object(object)
}

fn encode_permission(permission: &Permission) -> Value {
    let operations = permission
        .operations()
        .iter()
        .map(|op| Value::from(op.as_str()))
        .collect();

    let mut entry = Map::new();
    entry.insert(
        "actor".to_string(),
        Value::from(permission.actor().to_string()),
    );
    entry.insert("operations".to_string(), Value::Array(operations));
    Value::Object(entry)
}

/// Parse a single credential response.
///
/// When `expected` is given the wire `type` must match it.
///
/// # Errors
///
/// Returns `CodecError::UnknownCredentialType` for an unrecognized tag,
/// `CodecError::TypeMismatch` when the tag differs from `expected`, or
/// `CodecError::MalformedPayload` when a required key is missing or mistyped.
pub fn from_wire(json: &Value, expected: Option<CredentialType>) -> Result<CredentialDetails> {
    let object = as_object(json, "credential")?;
    let kind = read_kind(object, expected)?;

    let id = required_string(object, "id")?;
    let name = read_name(object)?;
    let value = decode_payload(object, kind)?;

    let mut details = CredentialDetails::new(id, name, value);
    if let Some(at) = optional_timestamp(object, "version_created_at")? {
        details = details.with_version_created_at(at);
    }

    debug!(id = %details.id(), name = %details.name(), kind = %kind, "decoded credential");
    Ok(details)
}

/// Parse a `{"data": [...]}` list response.
///
/// # Errors
///
/// Same as [`from_wire`] for every element, plus `MalformedPayload` when
/// `data` is missing or not an array.
pub fn data_from_wire(
    json: &Value,
    expected: Option<CredentialType>,
) -> Result<CredentialDetailsData> {
    let object = as_object(json, "credential list")?;
    let items = object
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| CodecError::MalformedPayload("'data' must be an array".to_string()))?;

    let data = items
        .iter()
        .map(|item| from_wire(item, expected))
        .collect::<Result<Vec<_>>>()?;
    Ok(CredentialDetailsData::new(data))
}

/// Parse a request envelope back into a validated [`CredentialRequest`].
///
/// The decoded draft goes through the builder, so an invalid payload fails
/// exactly as a hand-built one would.
///
/// # Errors
///
/// Codec errors as for [`from_wire`], or the builder's validation error.
pub fn request_from_wire(json: &Value) -> Result<CredentialRequest> {
    let object = as_object(json, "credential request")?;
    let kind = read_kind(object, None)?;
    let name = read_name(object)?;
    let value = decode_payload(object, kind)?;

    let overwrite = match object.get("overwrite") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(malformed("'overwrite' must be a boolean").into()),
    };

    let permissions = match object.get("additional_permissions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(decode_permission)
            .collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(malformed("'additional_permissions' must be an array").into()),
    };

    CredentialRequest::builder()
        .name(name)
        .overwrite(overwrite)
        .value(value)
        .permissions(permissions)
        .build()
}

/// Tag to payload decoder.
fn decoder(kind: CredentialType) -> Decode {
    match kind {
        CredentialType::Value => decode_value,
        CredentialType::Json => decode_json,
        CredentialType::Password => decode_password,
        CredentialType::User => decode_user,
        CredentialType::Ssh => decode_ssh,
        CredentialType::Rsa => decode_rsa,
        CredentialType::Certificate => decode_certificate,
    }
}

fn decode_payload(
    object: &Map<String, Value>,
    kind: CredentialType,
) -> std::result::Result<CredentialValue, CodecError> {
    let payload = object
        .get("value")
        .filter(|v| !v.is_null())
        .ok_or_else(|| malformed("missing 'value'"))?;
    decoder(kind)(payload)
}

fn decode_value(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    scalar_or_field(payload, "value").map(|v| ValueCredential::new(v).into())
}

fn decode_password(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    scalar_or_field(payload, "password").map(|v| PasswordCredential::new(v).into())
}

fn decode_json(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    let object = payload
        .as_object()
        .ok_or_else(|| malformed("json credential value must be an object"))?;
    Ok(JsonCredential::new(object.clone()).into())
}

fn decode_user(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    let object = as_object(payload, "user credential value")?;
    Ok(UserCredential::new(
        optional_string(object, "username")?,
        optional_string(object, "password")?,
    )
    .into())
}

fn decode_ssh(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    let object = as_object(payload, "ssh credential value")?;
    Ok(SshCredential::new(
        optional_string(object, "public_key")?,
        optional_string(object, "private_key")?,
    )
    .into())
}

fn decode_rsa(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    let object = as_object(payload, "rsa credential value")?;
    Ok(RsaCredential::new(
        optional_string(object, "public_key")?,
        optional_string(object, "private_key")?,
    )
    .into())
}

fn decode_certificate(payload: &Value) -> std::result::Result<CredentialValue, CodecError> {
    let object = as_object(payload, "certificate credential value")?;
    Ok(CertificateCredential {
        certificate: optional_string(object, "certificate")?,
        certificate_authority: optional_string(object, "certificate_authority")?,
        private_key: optional_string(object, "private_key")?,
        certificate_authority_name: optional_string(object, "certificate_authority_name")?,
        self_signed: optional_bool(object, "self_signed")?,
        generated: optional_bool(object, "generated")?,
        transitional: optional_bool(object, "transitional")?,
        expiry_date: optional_timestamp(object, "expiry_date")?,
    }
    .into())
}

fn decode_permission(json: &Value) -> Result<Permission> {
    let object = as_object(json, "permission")?;
    let actor = Actor::parse(&required_string(object, "actor")?)?;
    let operations = object
        .get("operations")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("'operations' must be an array"))?
        .iter()
        .map(|op| {
            op.as_str()
                .ok_or_else(|| malformed("operation must be a string").into())
                .and_then(str::parse::<Operation>)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Permission::new(actor).allow_all(operations))
}

fn read_kind(
    object: &Map<String, Value>,
    expected: Option<CredentialType>,
) -> std::result::Result<CredentialType, CodecError> {
    let tag = required_string(object, "type")?;
    let kind: CredentialType = tag.parse()?;
    match expected {
        Some(expected) if expected != kind => Err(CodecError::TypeMismatch {
            expected: expected.to_string(),
            actual: kind.to_string(),
        }),
        _ => Ok(kind),
    }
}

fn read_name(object: &Map<String, Value>) -> std::result::Result<CredentialName, CodecError> {
    let raw = required_string(object, "name")?;
    CredentialName::new(&raw).map_err(|e| malformed(&format!("invalid 'name': {}", e)))
}

fn scalar_or_field(payload: &Value, field: &str) -> std::result::Result<String, CodecError> {
    match payload {
        Value::String(s) => Ok(s.clone()),
        Value::Object(object) => required_string(object, field),
        _ => Err(malformed(&format!(
            "'{}' credential value must be a string",
            field
        ))),
    }
}

fn as_object<'a>(
    json: &'a Value,
    what: &str,
) -> std::result::Result<&'a Map<String, Value>, CodecError> {
    json.as_object()
        .ok_or_else(|| malformed(&format!("{} must be a JSON object", what)))
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
) -> std::result::Result<String, CodecError> {
    optional_string(object, key)?.ok_or_else(|| malformed(&format!("missing '{}'", key)))
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<String>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(malformed(&format!("'{}' must be a string", key))),
    }
}

fn optional_bool(
    object: &Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<bool>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(malformed(&format!("'{}' must be a boolean", key))),
    }
}

fn optional_timestamp(
    object: &Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<DateTime<Utc>>, CodecError> {
    optional_string(object, key)?
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc))
                .map_err(|e| malformed(&format!("'{}' is not an RFC 3339 timestamp: {}", key, e)))
        })
        .transpose()
}

fn malformed(reason: &str) -> CodecError {
    CodecError::MalformedPayload(reason.to_string())
}

/// Object under construction; `None` fields are skipped.
#[derive(Default)]
struct Fields(Map<String, Value>);

impl Fields {
    fn string(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn timestamp(mut self, key: &str, value: Option<DateTime<Utc>>) -> Self {
        if let Some(value) = value {
            self.0.insert(
                key.to_string(),
                Value::from(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }
        self
    }

    fn finish(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn request(value: impl Into<CredentialValue>) -> CredentialRequest {
        CredentialRequest::builder()
            .name(CredentialName::new("/example/credential").unwrap())
            .overwrite(true)
            .value(value)
            .build()
            .unwrap()
    }

    #[test]
    fn test_value_is_bare_string() {
        let wire = to_wire(&request(ValueCredential::new("secret")));
        assert_eq!(wire["type"], "value");
        assert_eq!(wire["value"], "secret");
    }

    #[test]
    fn test_user_omits_missing_half() {
        let wire = to_wire(&request(UserCredential::new(
            Some("admin".to_string()),
            None,
        )));
        assert_eq!(wire["value"], json!({"username": "admin"}));
    }

    #[test]
    fn test_certificate_false_flag_is_emitted() {
        let cert = CertificateCredential::default()
            .with_certificate("cert")
            .with_self_signed(false);
        let wire = to_wire(&request(cert));
        assert_eq!(
            wire["value"],
            json!({"certificate": "cert", "self_signed": false})
        );
    }

    #[test]
    fn test_certificate_expiry_roundtrip() {
        let at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let cert = CertificateCredential::default().with_expiry_date(at);
        let wire = to_wire(&request(cert.clone()));
        assert_eq!(wire["value"]["expiry_date"], "2030-01-02T03:04:05Z");

        let back = request_from_wire(&wire).unwrap();
        assert_eq!(back.value(), &CredentialValue::Certificate(cert));
    }

    #[test]
    fn test_decoder_accepts_object_forms() {
        let value = decode_value(&json!({"value": "secret"})).unwrap();
        assert_eq!(value, ValueCredential::new("secret").into());

        let value = decode_password(&json!({"password": "hunter2"})).unwrap();
        assert_eq!(value, PasswordCredential::new("hunter2").into());
    }

    #[test]
    fn test_null_fields_decode_as_absent() {
        let value = decode_ssh(&json!({"public_key": "pk", "private_key": null})).unwrap();
        assert_eq!(value, SshCredential::new(Some("pk".to_string()), None).into());
    }

    #[test]
    fn test_unknown_type() {
        let json = json!({"id": "1", "name": "/n", "type": "totp", "value": "x"});
        assert!(matches!(
            from_wire(&json, None),
            Err(Error::Codec(CodecError::UnknownCredentialType(t))) if t == "totp"
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let json = json!({"id": "1", "name": "/n", "type": "value", "value": "x"});
        assert!(matches!(
            from_wire(&json, Some(CredentialType::Password)),
            Err(Error::Codec(CodecError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_malformed_payloads() {
        let missing_value = json!({"id": "1", "name": "/n", "type": "value"});
        assert!(matches!(
            from_wire(&missing_value, None),
            Err(Error::Codec(CodecError::MalformedPayload(_)))
        ));

        let bad_flag = json!({
            "id": "1", "name": "/n", "type": "certificate",
            "value": {"self_signed": "yes"}
        });
        assert!(from_wire(&bad_flag, None).is_err());

        assert!(from_wire(&json!([1, 2]), None).is_err());
        assert!(data_from_wire(&json!({"data": {}}), None).is_err());
    }

    #[test]
    fn test_version_created_at() {
        let json = json!({
            "id": "1", "name": "/n", "type": "value", "value": "x",
            "version_created_at": "2017-05-04T10:20:30Z"
        });
        let details = from_wire(&json, None).unwrap();
        assert_eq!(
            details.version_created_at(),
            Some(Utc.with_ymd_and_hms(2017, 5, 4, 10, 20, 30).unwrap())
        );
    }

    #[test]
    fn test_details_roundtrip() {
        let details = CredentialDetails::new(
            "5a2e",
            CredentialName::new("/example/rsa").unwrap(),
            RsaCredential::new(Some("pub".to_string()), None).into(),
        )
        .with_version_created_at(Utc.with_ymd_and_hms(2017, 5, 4, 10, 20, 30).unwrap());

        let wire = details_to_wire(&details);
        assert_eq!(wire["value"], json!({"public_key": "pub"}));
        assert_eq!(from_wire(&wire, Some(CredentialType::Rsa)).unwrap(), details);

        let data = CredentialDetailsData::new(vec![details]);
        assert_eq!(data_from_wire(&data_to_wire(&data), None).unwrap(), data);
    }

    #[test]
    fn test_every_decoder_accepts_a_minimal_payload() {
        for kind in CredentialType::ALL {
            let payload = match kind {
                CredentialType::Value | CredentialType::Password => json!("secret"),
                CredentialType::Json => json!({"key": 1}),
                CredentialType::User => json!({"username": "admin"}),
                CredentialType::Ssh | CredentialType::Rsa => json!({"public_key": "pk"}),
                CredentialType::Certificate => json!({"certificate": "cert"}),
            };
            let value = decoder(kind)(&payload).unwrap();
            assert_eq!(value.kind(), kind);
            assert_eq!(encode_value(&value), payload);
        }
    }
}
