//! Shared test doubles.

#![allow(dead_code)]

use async_trait::async_trait;
use secure_forms::{DiagnosticSink, Error, HttpRequest, HttpResponse, Result, Transport};
use std::sync::{Arc, Mutex};

/// What the recording transport answers with.
#[derive(Clone)]
pub enum Reply {
    Respond { status: u16, body: Vec<u8> },
    Fail(String),
}

/// Transport that records every request and answers with a fixed reply.
#[derive(Clone)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl RecordingTransport {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(Reply::Respond {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        })
    }

    pub fn raw(status: u16, body: &[u8]) -> Self {
        Self::new(Reply::Respond {
            status,
            body: body.to_vec(),
        })
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Reply::Fail(message.to_string()))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Respond { status, body } => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Fail(message) => Err(Error::Transport(message.clone())),
        }
    }
}

/// Sink that keeps every report as `(message, error display)`.
#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<(String, Option<String>)> {
        self.reports.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, message: &str, error: Option<&Error>) {
        self.reports
            .lock()
            .unwrap()
            .push((message.to_string(), error.map(|e| e.to_string())));
    }
}
