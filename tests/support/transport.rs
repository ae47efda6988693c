//! Recording transport.
//!
//! Replays queued responses in order and keeps every request it was sent.

use credhub_client::error::TransportError;
use credhub_client::{HttpRequest, HttpResponse, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct Recorder {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body.
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.push(Ok(HttpResponse::new(status, Some(body))))
    }

    /// Queue a response without a body.
    pub fn respond_empty(self, status: u16) -> Self {
        self.push(Ok(HttpResponse::new(status, None)))
    }

    /// Queue a transport failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<HttpResponse, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for Recorder {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(500, None)))
    }
}
