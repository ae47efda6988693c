//! HTTP transport abstraction.
//!
//! The client hands a finished [`HttpRequest`] to a [`Transport`] and gets
//! back a status code and an optional JSON body. The transport owns every
//! network concern (connection pooling, timeouts, TLS trust); the credential
//! model never sees them.
//!
//! ## Adding a New Transport
//!
//! 1. Implement the `Transport` trait
//! 2. Add the implementation in a new file (e.g., `hyper.rs`)
//! 3. Feature-gate if it pulls in a new HTTP stack

use serde_json::Value;

use crate::error::TransportError;

mod options;

#[cfg(feature = "http")]
pub mod http;

pub use options::ClientOptions;

#[cfg(feature = "http")]
pub use http::HttpTransport;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent, relative to the server's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// What came back. `body` is `None` for empty responses.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the credential service.
///
/// Implementations must be safe to call from several threads at once if the
/// client is shared; the client itself keeps no per-request state.
pub trait Transport {
    /// Send one request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` for connection, timeout or TLS failures.
    /// Non-2xx statuses are not errors at this layer.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}
