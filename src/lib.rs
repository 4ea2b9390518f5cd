//! # Secure Forms Rust SDK
//!
//! Client for contact and reservation form backends that authenticate
//! submissions with an HMAC-SHA256 signature.
//!
//! Each request body is serialized once, signed with the shared secret, and
//! sent with the signature in `X-Signature` and the key in `X-API-Key`:
//!
//! ```text
//! POST {base_url}{endpoint}
//! Content-Type: application/json
//! X-API-Key: {shared secret}
//! X-Signature: {hex HMAC-SHA256 of the body}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secure_forms::{Client, ContactForm, ContactMethod};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("https://forms.example.com", "topsecret")?;
//!
//!     let form = ContactForm {
//!         name: "Anna".to_string(),
//!         email: "a@example.com".to_string(),
//!         contact_method: ContactMethod::Email,
//!         phone: None,
//!         message: Some("hi".to_string()),
//!     }
//!     .trimmed();
//!     form.validate()?;
//!
//!     let reply = client.send_contact_form(&form).await?;
//!     println!("{}", reply["message"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Unsigned Requests
//!
//! [`Client::unsigned`] sends the same bodies without a signature. The
//! `X-API-Key` header is only attached when a key is configured.
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`. [`Error::message`] is safe to show
//! to end users:
//!
//! ```rust,no_run
//! use secure_forms::{Client, Error};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new("https://forms.example.com", "topsecret").unwrap();
//!
//!     match client.send_contact_form(&json!({"name": "Anna"})).await {
//!         Ok(reply) => println!("Sent: {}", reply),
//!         Err(Error::Api { message, status_code: 400 }) => println!("Invalid form: {}", message),
//!         Err(e) if e.is_auth_error() => println!("Signature rejected"),
//!         Err(e) => println!("Error: {}", e.message()),
//!     }
//! }
//! ```
//!
//! Failures are also reported to a [`DiagnosticSink`]; by default a `tracing`
//! error event. The crate never installs a subscriber.

pub mod client;
pub mod diagnostics;
pub mod error;
pub mod signing;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig};
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use signing::{SignedEnvelope, SigningMode, sign_payload};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{ContactForm, ContactMethod, HealthStatus, ReservationForm, SubmissionResponse};
pub use validation::{ValidationError, ValidationErrors};
