//! Request signing.
//!
//! A payload is serialized exactly once. The HMAC-SHA256 tag is computed over
//! those bytes and the very same bytes become the request body, so the server
//! can verify the signature against what it received on the wire. Keys are
//! not sorted before signing: `{"a":1,"b":2}` and `{"b":2,"a":1}` carry
//! different signatures.

use crate::error::{Error, Result};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the client identifier (the shared secret).
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Header carrying the hex HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";
/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Whether outgoing requests are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningMode {
    /// Attach `X-Signature` computed with the shared secret.
    #[default]
    Hmac,
    /// Send the body as is; `X-API-Key` is still attached when a key exists.
    Disabled,
}

/// Serialize a payload to the compact JSON bytes used on the wire.
pub fn serialize_payload<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|e| Error::Serialization(e.to_string()))
}

/// Sign bytes with HMAC-SHA256, returning a lowercase hex signature.
pub fn sign_payload(secret: &str, payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| Error::Configuration("invalid signing secret".into()))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Body and authentication headers for one outgoing request.
#[derive(Clone)]
pub struct SignedEnvelope {
    body: Vec<u8>,
    api_key: Option<String>,
    signature: Option<String>,
}

impl SignedEnvelope {
    /// Serialize `payload` once and sign it according to `mode`.
    ///
    /// Fails with [`Error::Configuration`] when `mode` is [`SigningMode::Hmac`]
    /// and no key is configured. An empty key counts as no key.
    pub fn seal<P: Serialize + ?Sized>(
        payload: &P,
        api_key: Option<&str>,
        mode: SigningMode,
    ) -> Result<Self> {
        let api_key = api_key.filter(|key| !key.is_empty());
        if mode == SigningMode::Hmac && api_key.is_none() {
            return Err(Error::Configuration(
                "signing requested but no shared secret is configured".into(),
            ));
        }

        let body = serialize_payload(payload)?;
        let signature = match (mode, api_key) {
            (SigningMode::Hmac, Some(secret)) => Some(sign_payload(secret, &body)?),
            _ => None,
        };

        Ok(Self {
            body,
            api_key: api_key.map(str::to_owned),
            signature,
        })
    }

    /// The serialized payload, byte-identical to what was signed.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The hex signature, if the envelope was signed.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Headers to attach to the request, in wire order.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
        if let Some(key) = &self.api_key {
            headers.push((API_KEY_HEADER.to_string(), key.clone()));
        }
        if let Some(signature) = &self.signature {
            headers.push((SIGNATURE_HEADER.to_string(), signature.clone()));
        }
        headers
    }

    /// Consume the envelope, yielding its headers and body.
    pub fn into_parts(self) -> (Vec<(String, String)>, Vec<u8>) {
        let headers = self.headers();
        (headers, self.body)
    }
}

impl std::fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedEnvelope")
            .field("body_len", &self.body.len())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("signed", &self.signature.is_some())
            .finish()
    }
}
