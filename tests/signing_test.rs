//! Signing properties, checked against a recording transport.

mod common;

use common::{RecordingSink, RecordingTransport};
use secure_forms::{Client, ClientConfig, Error, sign_payload};
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};

fn signed_client(secret: &str, transport: &RecordingTransport) -> Client {
    Client::with_transport(
        ClientConfig::signed("https://forms.example.com", secret),
        transport.clone(),
    )
}

fn sample_payloads() -> Vec<Value> {
    vec![
        json!({}),
        json!({"name": "Anna", "email": "a@example.com", "message": "hi"}),
        json!({"name": "Zoë", "count": 3, "ok": true, "note": null}),
        json!({"nested": {"list": [1, 2.5, "three"], "flag": false}}),
    ]
}

#[test]
fn test_sign_is_deterministic() {
    let transport = RecordingTransport::json(200, json!({}));
    let client = signed_client("topsecret", &transport);

    for payload in sample_payloads() {
        let first = client.sign(&payload).unwrap();
        let second = client.sign(&payload).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_distinct_secrets_give_distinct_signatures() {
    let transport = RecordingTransport::json(200, json!({}));
    let a = signed_client("secret-one", &transport);
    let b = signed_client("secret-two", &transport);

    for payload in sample_payloads() {
        assert_ne!(a.sign(&payload).unwrap(), b.sign(&payload).unwrap());
    }
}

#[test]
fn test_key_order_changes_signature() {
    let transport = RecordingTransport::json(200, json!({}));
    let client = signed_client("topsecret", &transport);

    let name_first = json!({"name": "Anna", "email": "a@example.com"});
    let email_first = json!({"email": "a@example.com", "name": "Anna"});

    assert_eq!(name_first, email_first);
    assert_ne!(
        client.sign(&name_first).unwrap(),
        client.sign(&email_first).unwrap()
    );
}

#[tokio::test]
async fn test_signature_covers_exact_body() {
    let transport = RecordingTransport::json(200, json!({"message": "ok"}));
    let client = signed_client("topsecret", &transport);

    for payload in sample_payloads() {
        assert_ok!(client.send_secure_request("/api/contact", &payload).await);

        let request = transport.last_request();
        let body = request.body.clone().unwrap();
        assert_eq!(body, serde_json::to_vec(&payload).unwrap());
        assert_eq!(
            request.header("X-Signature").unwrap(),
            sign_payload("topsecret", &body).unwrap()
        );
        assert_eq!(request.header("X-Signature").unwrap(), client.sign(&payload).unwrap());
    }
}

#[tokio::test]
async fn test_request_line_and_headers() {
    let transport = RecordingTransport::json(200, json!({"message": "ok"}));
    let client = signed_client("topsecret", &transport);

    client
        .send_secure_request("/api/custom", &json!({"a": 1}))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.url, "https://forms.example.com/api/custom");
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("X-API-Key"), Some("topsecret"));
}

#[tokio::test]
async fn test_unsigned_bodies_match_signed_bodies() {
    let signed_transport = RecordingTransport::json(200, json!({}));
    let unsigned_transport = RecordingTransport::json(200, json!({}));
    let signed = signed_client("topsecret", &signed_transport);
    let unsigned = Client::with_transport(
        ClientConfig::unsigned("https://forms.example.com"),
        unsigned_transport.clone(),
    );

    for payload in sample_payloads() {
        signed.send_contact_form(&payload).await.unwrap();
        unsigned.send_contact_form(&payload).await.unwrap();

        let a = signed_transport.last_request();
        let b = unsigned_transport.last_request();
        assert_eq!(a.body, b.body);
        assert!(b.header("X-Signature").is_none());
        assert!(b.header("X-API-Key").is_none());
    }
}

#[tokio::test]
async fn test_unsigned_with_key_sends_identifier_only() {
    let transport = RecordingTransport::json(200, json!({}));
    let client = Client::with_transport(
        ClientConfig::unsigned("https://forms.example.com").with_api_key("public-id"),
        transport.clone(),
    );

    client.send_contact_form(&json!({"name": "Anna"})).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.header("X-API-Key"), Some("public-id"));
    assert!(request.header("X-Signature").is_none());
}

#[tokio::test]
async fn test_signing_without_secret_is_configuration_error() {
    let transport = RecordingTransport::json(200, json!({}));
    let sink = RecordingSink::default();
    let mut config = ClientConfig::signed("https://forms.example.com", "unused");
    config.api_key = None;
    let client = Client::with_transport(config, transport.clone()).with_diagnostics(sink.clone());

    let err = assert_err!(client.send_contact_form(&json!({"name": "Anna"})).await);
    assert!(matches!(err, Error::Configuration(_)));
    assert!(transport.requests().is_empty());
    assert_eq!(sink.reports().len(), 1);
}

#[tokio::test]
async fn test_empty_secret_is_configuration_error() {
    let transport = RecordingTransport::json(200, json!({"message": "ok"}));
    let sink = RecordingSink::default();
    let client = signed_client("", &transport).with_diagnostics(sink.clone());

    assert!(matches!(
        client.sign(&json!({"name": "Anna"})),
        Err(Error::Configuration(_))
    ));

    let err = assert_err!(client.send_contact_form(&json!({"name": "Anna"})).await);
    assert!(matches!(err, Error::Configuration(_)));
    assert!(transport.requests().is_empty());
    assert_eq!(sink.reports().len(), 1);
}
