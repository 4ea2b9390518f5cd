//! Type definitions for the Secure Forms SDK.
//!
//! Form payloads and the response bodies returned by the forms backend.
//! Field declaration order is the order fields appear on the wire, which is
//! also the order the signature covers.

use serde::{Deserialize, Serialize};

/// Endpoint accepting contact form submissions.
pub const CONTACT_ENDPOINT: &str = "/api/contact";
/// Endpoint accepting reservation form submissions.
pub const RESERVATION_ENDPOINT: &str = "/api/reservation";
/// Health check endpoint.
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// How the sender prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Reply by e-mail.
    #[default]
    Email,
    /// Reply by phone; a phone number is then required.
    Phone,
}

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender's name.
    pub name: String,
    /// Sender's e-mail address.
    pub email: String,
    /// Preferred contact method.
    pub contact_method: ContactMethod,
    /// Phone number (required when `contact_method` is `Phone`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-form message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A reservation form submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReservationForm {
    /// Sender's name.
    pub name: String,
    /// Sender's e-mail address.
    pub email: String,
    /// Preferred contact method.
    pub contact_method: ContactMethod,
    /// Phone number (required when `contact_method` is `Phone`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Requested service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Additional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Body returned by a successful form submission.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubmissionResponse {
    /// Confirmation message.
    pub message: String,
}

/// Body returned by the health check endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthStatus {
    /// Overall service status (e.g. "healthy").
    pub status: String,
    /// Server time, ISO 8601.
    pub timestamp: String,
    /// Whether the backend's mail service is reachable.
    #[serde(default)]
    pub email_service: bool,
}

impl HealthStatus {
    /// Returns true if the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
