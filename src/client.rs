//! Secure Forms API client.
//!
//! The main entry point for submitting forms to the backend.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{DEFAULT_FAILURE_MESSAGE, Error, Result};
use crate::signing::{SignedEnvelope, SigningMode, serialize_payload, sign_payload};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::{CONTACT_ENDPOINT, HEALTH_ENDPOINT, HealthStatus, RESERVATION_ENDPOINT};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const ENV_API_URL: &str = "SECURE_FORMS_API_URL";
const ENV_API_KEY: &str = "SECURE_FORMS_API_KEY";
const ENV_SIGNING: &str = "SECURE_FORMS_SIGNING";
const ENV_TIMEOUT_SECS: &str = "SECURE_FORMS_TIMEOUT_SECS";

/// Secure Forms API client.
///
/// Cheap to clone; clones share the same configuration and transport.
///
/// # Example
///
/// ```rust,no_run
/// use secure_forms::Client;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new("https://forms.example.com", "topsecret")?;
///
///     let reply = client
///         .send_contact_form(&json!({
///             "name": "Anna",
///             "email": "a@example.com",
///             "message": "hi"
///         }))
///         .await?;
///     println!("{}", reply["message"]);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

/// Configuration options for the client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for the API; endpoint paths are appended verbatim.
    pub base_url: String,
    /// Shared secret. Sent as `X-API-Key` and used as the HMAC key.
    pub api_key: Option<String>,
    /// Whether requests carry an `X-Signature` header.
    pub signing: SigningMode,
    /// Request timeout. Unset leaves the transport's default in place.
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration for a client that signs every request.
    pub fn signed(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some(secret.into()),
            signing: SigningMode::Hmac,
            timeout: None,
            user_agent: None,
        }
    }

    /// Configuration for a client that never signs and sends no key.
    pub fn unsigned(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            signing: SigningMode::Disabled,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the key sent as `X-API-Key` (and used for signing in signed mode).
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load configuration from `SECURE_FORMS_*` environment variables.
    ///
    /// * `SECURE_FORMS_API_URL` - base URL (required)
    /// * `SECURE_FORMS_API_KEY` - shared secret (optional)
    /// * `SECURE_FORMS_SIGNING` - `false` or `0` disables signing
    /// * `SECURE_FORMS_TIMEOUT_SECS` - request timeout in seconds (optional)
    ///
    /// Signing is on whenever a key is present and not explicitly disabled.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Configuration(format!("{} is not set", ENV_API_URL)))?;

        let api_key = lookup(ENV_API_KEY).filter(|key| !key.is_empty());

        let signing_disabled = lookup(ENV_SIGNING)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0"))
            .unwrap_or(false);
        let signing = if api_key.is_some() && !signing_disabled {
            SigningMode::Hmac
        } else {
            SigningMode::Disabled
        };

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Configuration(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            signing,
            timeout,
            user_agent: None,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("signing", &self.signing)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Client {
    /// Create a client that signs every request with `secret`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use secure_forms::Client;
    ///
    /// let client = Client::new("https://forms.example.com", "topsecret").unwrap();
    /// ```
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::signed(base_url, secret))
    }

    /// Create a client that sends plain JSON with no key and no signature.
    pub fn unsigned(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::unsigned(base_url))
    }

    /// Create a client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use secure_forms::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(
    ///     ClientConfig::signed("https://forms.example.com", "topsecret")
    ///         .with_timeout(Duration::from_secs(10))
    ///         .with_user_agent("landing-page/1.0"),
    /// )
    /// .unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, config.user_agent.clone())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Replace the sink that receives failure reports.
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Arc::new(sink);
        self
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the signing mode.
    pub fn signing_mode(&self) -> SigningMode {
        self.config.signing
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Compute the signature the client would attach for `payload`.
    ///
    /// Fails with [`Error::Configuration`] if no shared secret (or an empty
    /// one) is configured.
    pub fn sign<P: Serialize + ?Sized>(&self, payload: &P) -> Result<String> {
        let secret = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Configuration("signing requested but no shared secret is configured".into())
            })?;
        sign_payload(secret, &serialize_payload(payload)?)
    }

    /// POST `payload` to `endpoint_path` and return the parsed response body.
    ///
    /// In signed mode the request carries `X-API-Key` and `X-Signature`; in
    /// unsigned mode only `X-API-Key`, and only if a key is configured. The
    /// body is the exact byte sequence that was signed.
    ///
    /// Failures are reported to the diagnostic sink and returned; nothing is
    /// retried.
    pub async fn send_secure_request<P: Serialize + ?Sized>(
        &self,
        endpoint_path: &str,
        payload: &P,
    ) -> Result<Value> {
        let result = self.post_envelope(endpoint_path, payload).await;
        if let Err(err) = &result {
            self.diagnostics.report("Secure API request failed", Some(err));
        }
        result
    }

    /// Submit a contact form to `/api/contact`.
    pub async fn send_contact_form<P: Serialize + ?Sized>(&self, form: &P) -> Result<Value> {
        self.send_secure_request(CONTACT_ENDPOINT, form).await
    }

    /// Submit a reservation form to `/api/reservation`.
    pub async fn send_reservation_form<P: Serialize + ?Sized>(&self, form: &P) -> Result<Value> {
        self.send_secure_request(RESERVATION_ENDPOINT, form).await
    }

    /// Query `/api/health`.
    ///
    /// Sent without key or signature. Failures are reported like any other
    /// request.
    pub async fn health(&self) -> Result<HealthStatus> {
        let request = HttpRequest {
            method: Method::GET,
            url: self.url(HEALTH_ENDPOINT),
            headers: Vec::new(),
            body: None,
        };

        let result = self.execute(request).await;
        if let Err(err) = &result {
            self.diagnostics.report("Health check failed", Some(err));
        }
        result
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn post_envelope<P: Serialize + ?Sized>(
        &self,
        endpoint_path: &str,
        payload: &P,
    ) -> Result<Value> {
        let envelope =
            SignedEnvelope::seal(payload, self.config.api_key.as_deref(), self.config.signing)?;
        let signed = envelope.signature().is_some();
        let (headers, body) = envelope.into_parts();

        let request = HttpRequest {
            method: Method::POST,
            url: self.url(endpoint_path),
            headers,
            body: Some(body),
        };
        tracing::debug!(method = %request.method, url = %request.url, signed, "sending request");

        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "received response");
        handle_response(response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn handle_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    if response.is_success() {
        serde_json::from_slice(&response.body).map_err(|e| {
            let reason = if e.is_data() {
                "response body does not have the expected shape"
            } else {
                "response body is not valid JSON"
            };
            Error::ResponseParse(format!("{}: {}", reason, e))
        })
    } else {
        Err(parse_error(response))
    }
}

fn parse_error(response: HttpResponse) -> Error {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(body) => Error::Api {
            message: error_message(&body),
            status_code: response.status,
        },
        Err(e) => Error::ResponseParse(format!(
            "error response (HTTP {}) is not valid JSON: {}",
            response.status, e
        )),
    }
}

/// Extract the `error` field: a string as is, a list joined with ", ".
fn error_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => DEFAULT_FAILURE_MESSAGE.to_string(),
    }
}
