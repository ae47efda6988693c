//! Credential API client.
//!
//! Turns credential requests into HTTP calls against `/api/v1/data` and
//! parses the responses back into read models. Status codes are checked
//! here; everything below is the transport's business.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::constants::DATA_PATH;
use crate::core::{wire, CredentialDetails, CredentialDetailsData, CredentialName, CredentialRequest, CredentialType};
use crate::error::{CodecError, Error, Result, ValidationError};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Client for the credential data endpoints.
#[derive(Debug, Clone)]
pub struct CredHubClient<T> {
    transport: T,
}

impl<T: Transport> CredHubClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write a credential and return the stored version.
    ///
    /// # Errors
    ///
    /// Returns `Error::Status` for a non-2xx response, `Error::Transport` if
    /// the request could not be sent, or `Error::Codec` if the response does
    /// not match the written type.
    pub fn write(&self, request: &CredentialRequest) -> Result<CredentialDetails> {
        let http = HttpRequest::new(Method::Put, DATA_PATH).body(wire::to_wire(request));
        let body = self.execute(&http)?;
        wire::from_wire(&body, Some(request.kind()))
    }

    /// Fetch a credential version by id.
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write); `expected` is checked against the
    /// response's type tag when given. An id that would change the request
    /// path gives `ValidationError::InvalidId` before anything is sent.
    pub fn get_by_id(&self, id: &str, expected: Option<CredentialType>) -> Result<CredentialDetails> {
        check_id(id)?;
        let http = HttpRequest::new(Method::Get, format!("{}/{}", DATA_PATH, id));
        let body = self.execute(&http)?;
        wire::from_wire(&body, expected)
    }

    /// Fetch all versions of a credential by name, newest first.
    ///
    /// # Errors
    ///
    /// As for [`get_by_id`](Self::get_by_id).
    pub fn get_by_name(
        &self,
        name: &CredentialName,
        expected: Option<CredentialType>,
    ) -> Result<CredentialDetailsData> {
        let http = HttpRequest::new(Method::Get, DATA_PATH).query("name", name.as_str());
        let body = self.execute(&http)?;
        wire::data_from_wire(&body, expected)
    }

    /// Delete every version of a credential.
    ///
    /// # Errors
    ///
    /// Returns `Error::Status` for a non-2xx response or `Error::Transport`
    /// if the request could not be sent.
    pub fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        let http = HttpRequest::new(Method::Delete, DATA_PATH).query("name", name.as_str());
        self.send(&http)?;
        Ok(())
    }

    fn send(&self, http: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %http.method, path = %http.path, "calling credhub");
        let response = self.transport.send(http)?;

        if !response.is_success() {
            let message = error_message(response.body.as_ref());
            warn!(method = %http.method, path = %http.path, status = response.status, "credhub request failed");
            return Err(Error::Status {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    fn execute(&self, http: &HttpRequest) -> Result<Value> {
        self.send(http)?.body.ok_or_else(|| {
            CodecError::MalformedPayload("empty response body".to_string()).into()
        })
    }
}

/// Ids go into the path verbatim.
fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(&['/', '?', '#', '%'][..]) || id.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidId(id.to_string()).into());
    }
    Ok(())
}

/// The service reports failures as `{"error": "..."}`.
fn error_message(body: Option<&Value>) -> String {
    match body {
        Some(Value::Object(object)) => object
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(object.clone()).to_string()),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "no response body".to_string(),
    }
}
