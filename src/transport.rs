//! HTTP transport seam.
//!
//! The client builds an [`HttpRequest`] and hands it to a [`Transport`]. The
//! default [`ReqwestTransport`] sends it with `reqwest`; tests swap in a
//! recording double.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use std::time::Duration;

/// A fully built outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, in the order they are attached.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response: status plus raw body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the network.
///
/// Implementations return [`crate::Error::Transport`] when no response was
/// received. Any response, whatever its status, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and read the full response body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    /// Build a transport.
    ///
    /// `timeout` is only applied when given; otherwise reqwest's own default
    /// (no timeout) stays in effect.
    pub fn new(timeout: Option<Duration>, user_agent: Option<String>) -> Result<Self> {
        let user_agent = user_agent
            .unwrap_or_else(|| format!("secure-forms-rust/{}", env!("CARGO_PKG_VERSION")));

        let mut builder = HttpClient::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wrap an existing `reqwest` client.
    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.http.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
