//! Health check example for the Secure Forms SDK.
//!
//! Run with:
//! ```bash
//! SECURE_FORMS_API_URL=http://localhost:5000 cargo run --example health_check
//! ```

use secure_forms::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::with_config(ClientConfig::from_env()?)?;

    let health = client.health().await?;
    println!("API status:    {}", health.status);
    println!("Server time:   {}", health.timestamp);
    println!(
        "Email service: {}",
        if health.email_service { "connected" } else { "unavailable" }
    );

    Ok(())
}
