//! Contact form submission example for the Secure Forms SDK.
//!
//! This example demonstrates:
//! - Loading client configuration from the environment
//! - Validating a form before sending it
//! - Submitting a signed contact form
//!
//! Run with:
//! ```bash
//! SECURE_FORMS_API_URL=http://localhost:5000 SECURE_FORMS_API_KEY=xxx cargo run --example contact_form
//! ```

use secure_forms::{Client, ClientConfig, ContactForm, ContactMethod, SubmissionResponse};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    println!("Submitting to {} (signing: {:?})", config.base_url, config.signing);
    let client = Client::with_config(config)?;

    let form = ContactForm {
        name: "Anna Nowak ".to_string(),
        email: "anna@example.com".to_string(),
        contact_method: ContactMethod::Email,
        phone: None,
        message: Some("Hello, I'd like to know more about your services.".to_string()),
    }
    .trimmed();

    if let Err(errors) = form.validate() {
        println!("Form is invalid: {}", errors);
        return Ok(());
    }

    if let Ok(signature) = client.sign(&form) {
        println!("Signature: {}", signature);
    }

    match client.send_contact_form(&form).await {
        Ok(body) => {
            let reply: SubmissionResponse = serde_json::from_value(body)?;
            println!("Sent: {}", reply.message);
        }
        Err(e) => println!("Failed to send: {}", e.message()),
    }

    Ok(())
}
