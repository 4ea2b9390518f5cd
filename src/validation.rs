//! Client-side form validation.
//!
//! These checks mirror the backend's field rules (presence, format and
//! length limits), so obviously bad submissions can be rejected before a
//! request is made. The server also runs spam heuristics that are not
//! reproduced here, so passing does not guarantee acceptance.

use crate::types::{ContactForm, ContactMethod, ReservationForm};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 254;
const MAX_SERVICE_CHARS: usize = 200;
const MAX_TEXT_CHARS: usize = 2000;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

// Optional +48 prefix, then 7-15 digits, spaces, dashes or parentheses.
// Caps a valid number at 19 characters, inside the backend's 20 limit.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+48\s?)?[\d\s\-\(\)]{7,15}$").expect("Invalid phone regex")
});

/// A single failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name missing or shorter than two characters.
    NameTooShort,
    /// Name longer than 100 characters.
    NameTooLong,
    /// E-mail missing.
    EmailRequired,
    /// E-mail present but malformed.
    EmailInvalid,
    /// E-mail longer than 254 characters.
    EmailTooLong,
    /// Phone contact selected without a phone number.
    PhoneRequired,
    /// Phone number present but malformed.
    PhoneInvalid,
    /// Service name longer than 200 characters.
    ServiceTooLong,
    /// Message or additional info longer than 2000 characters.
    TextTooLong,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::NameTooShort => "Name is required (minimum 2 characters)",
            ValidationError::NameTooLong => "Name is too long (maximum 100 characters)",
            ValidationError::EmailRequired => "Email address is required",
            ValidationError::EmailInvalid => "Enter a valid email address",
            ValidationError::EmailTooLong => "Email address is too long",
            ValidationError::PhoneRequired => {
                "Phone number is required when phone contact is selected"
            }
            ValidationError::PhoneInvalid => "Enter a valid phone number",
            ValidationError::ServiceTooLong => "Service name is too long",
            ValidationError::TextTooLong => "Text is too long (maximum 2000 characters)",
        };
        f.write_str(msg)
    }
}

/// Every rule a form failed, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// The individual failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns true if `error` is among the failures.
    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Returns true if `name` has at least two characters once trimmed.
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}

/// Returns true if `email` looks like an e-mail address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns true if `phone` looks like a phone number.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

fn check_contact_fields(
    name: &str,
    email: &str,
    method: ContactMethod,
    phone: Option<&str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_name(name) {
        errors.push(ValidationError::NameTooShort);
    } else if char_len(name) > MAX_NAME_CHARS {
        errors.push(ValidationError::NameTooLong);
    }

    let email = email.trim();
    if email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else if !is_valid_email(email) {
        errors.push(ValidationError::EmailInvalid);
    } else if char_len(email) > MAX_EMAIL_CHARS {
        errors.push(ValidationError::EmailTooLong);
    }

    let phone = phone.map(str::trim).filter(|p| !p.is_empty());
    match phone {
        None if method == ContactMethod::Phone => errors.push(ValidationError::PhoneRequired),
        Some(p) if !is_valid_phone(p) => errors.push(ValidationError::PhoneInvalid),
        _ => {}
    }

    errors
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn check_optional_len(
    errors: &mut Vec<ValidationError>,
    value: Option<&str>,
    max: usize,
    error: ValidationError,
) {
    if value.is_some_and(|v| char_len(v) > max) {
        errors.push(error);
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn trim_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl ContactForm {
    /// Copy of the form with every text field trimmed and empty optionals dropped.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact_method: self.contact_method,
            phone: trim_optional(&self.phone),
            message: trim_optional(&self.message),
        }
    }

    /// Check the form against the client-side rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = check_contact_fields(
            &self.name,
            &self.email,
            self.contact_method,
            self.phone.as_deref(),
        );
        check_optional_len(
            &mut errors,
            self.message.as_deref(),
            MAX_TEXT_CHARS,
            ValidationError::TextTooLong,
        );
        into_result(errors)
    }
}

impl ReservationForm {
    /// Copy of the form with every text field trimmed and empty optionals dropped.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact_method: self.contact_method,
            phone: trim_optional(&self.phone),
            service: trim_optional(&self.service),
            additional_info: trim_optional(&self.additional_info),
        }
    }

    /// Check the form against the client-side rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = check_contact_fields(
            &self.name,
            &self.email,
            self.contact_method,
            self.phone.as_deref(),
        );
        check_optional_len(
            &mut errors,
            self.service.as_deref(),
            MAX_SERVICE_CHARS,
            ValidationError::ServiceTooLong,
        );
        check_optional_len(
            &mut errors,
            self.additional_info.as_deref(),
            MAX_TEXT_CHARS,
            ValidationError::TextTooLong,
        );
        into_result(errors)
    }
}
