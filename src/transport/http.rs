//! `reqwest` transport.
//!
//! Blocking client over rustls. Enable with `--features http` (on by default).
//!
//! When `ca_cert_files` is configured the built-in root store is switched
//! off and only the given PEM certificates are trusted; otherwise the
//! bundled webpki roots are used. Timeouts are applied only when set.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, info, trace};

use super::{ClientOptions, HttpRequest, HttpResponse, Method, Transport};
use crate::error::TransportError;

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Configure a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` for a URL without an http(s)
    /// scheme, `TransportError::Certificate` when a CA file cannot be read or
    /// parsed, or `TransportError::Http` if the client fails to build.
    pub fn new(base_url: &str, options: &ClientOptions) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(TransportError::InvalidUrl(base_url));
        }

        let builder = trust(Client::builder().use_rustls_tls(), options)?;
        let builder = timeouts(builder, options);
        let client = builder
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        info!(
            base_url = %base_url,
            custom_certs = options.uses_custom_certs(),
            connection_timeout = ?options.connection_timeout(),
            read_timeout = ?options.read_timeout(),
            "configured http transport"
        );

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn trust(mut builder: ClientBuilder, options: &ClientOptions) -> Result<ClientBuilder, TransportError> {
    let Some(files) = options.ca_cert_files() else {
        return Ok(builder);
    };

    builder = builder.tls_built_in_root_certs(false);
    for path in files {
        let certificate_error = |reason: String| TransportError::Certificate {
            path: path.display().to_string(),
            reason,
        };
        let pem = std::fs::read(path).map_err(|e| certificate_error(e.to_string()))?;
        let certificate =
            reqwest::Certificate::from_pem(&pem).map_err(|e| certificate_error(e.to_string()))?;
        debug!(path = %path.display(), "added CA certificate");
        builder = builder.add_root_certificate(certificate);
    }
    Ok(builder)
}

fn timeouts(mut builder: ClientBuilder, options: &ClientOptions) -> ClientBuilder {
    if let Some(timeout) = options.connection_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = options.read_timeout() {
        builder = builder.timeout(timeout);
    }
    builder
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Http(e.to_string())
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(method(request.method), &url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(classify)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(classify)?;
        debug!(method = %request.method, path = %request.path, status, "response received");

        let body = if text.trim().is_empty() {
            None
        } else {
            // Error pages from proxies are not JSON; keep them as a string.
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };

        Ok(HttpResponse::new(status, body))
    }
}
