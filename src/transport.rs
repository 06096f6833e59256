//! The network seam: one POST of a [`WirePayload`] per submission.
//!
//! [`Transport`] is what a session talks to. [`HttpTransport`] is the
//! multipart implementation over reqwest; tests and embedders can supply
//! their own.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::payload::WirePayload;

/// What the server answered.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Builds a response from a raw body.
    ///
    /// JSON bodies are parsed; any other text becomes a JSON string and an
    /// empty body becomes `Null`.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Any status in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// A server-provided message: the `message` field of an object body,
    /// or the body itself when it is a string. Blank messages are ignored.
    pub fn message(&self) -> Option<&str> {
        let message = match &self.body {
            Value::Object(map) => map.get("message").and_then(Value::as_str),
            Value::String(text) => Some(text.as_str()),
            _ => None,
        };
        message.filter(|m| !m.trim().is_empty())
    }
}

/// Sends a payload to an endpoint.
///
/// Any HTTP status counts as a response. Only a failure to obtain one is a
/// [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        payload: WirePayload,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post(
        &self,
        endpoint: &str,
        payload: WirePayload,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post(endpoint, payload).await
    }
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;

    use super::{Transport, TransportResponse};
    use crate::error::TransportError;
    use crate::payload::{PayloadValue, WirePayload};

    /// Multipart POST over reqwest.
    ///
    /// No timeout is configured; cancellation belongs to the caller.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        pub fn new() -> Result<Self, TransportError> {
            let client = Client::builder()
                .build()
                .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {}", e)))?;
            Ok(Self { client })
        }

        /// Uses an existing client, e.g. one with proxies or TLS settings.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }

        fn build_form(payload: WirePayload) -> Result<Form, TransportError> {
            let mut form = Form::new();
            for (key, value) in payload {
                form = match value {
                    PayloadValue::Text(text) => form.text(key, text),
                    PayloadValue::File(file) => {
                        let part = Part::bytes(file.bytes.to_vec())
                            .file_name(file.file_name.clone())
                            .mime_str(&file.mime_type)
                            .map_err(|e| {
                                TransportError::Request(format!(
                                    "invalid MIME type '{}' for {}: {}",
                                    file.mime_type, file.file_name, e
                                ))
                            })?;
                        form.part(key, part)
                    }
                };
            }
            Ok(form)
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn post(
            &self,
            endpoint: &str,
            payload: WirePayload,
        ) -> Result<TransportResponse, TransportError> {
            let parts = payload.len();
            let form = Self::build_form(payload)?;
            tracing::debug!(endpoint, parts, "posting multipart form");

            let network = |e: reqwest::Error| TransportError::Network {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            };

            let response = self
                .client
                .post(endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(network)?;

            let status = response.status().as_u16();
            let text = response.text().await.map_err(network)?;
            Ok(TransportResponse::from_text(status, &text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_parsing() {
        assert_eq!(
            TransportResponse::from_text(200, r#"{"ok":true}"#).body,
            json!({"ok": true})
        );
        assert_eq!(
            TransportResponse::from_text(500, "boom").body,
            json!("boom")
        );
        assert_eq!(TransportResponse::from_text(204, "").body, Value::Null);
    }

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, Value::Null).is_success());
        assert!(TransportResponse::new(299, Value::Null).is_success());
        assert!(!TransportResponse::new(300, Value::Null).is_success());
        assert!(!TransportResponse::new(199, Value::Null).is_success());
    }

    #[test]
    fn test_message() {
        let r = TransportResponse::new(400, json!({"message": "Email already used"}));
        assert_eq!(r.message(), Some("Email already used"));

        let r = TransportResponse::new(400, json!({"error": "x"}));
        assert_eq!(r.message(), None);

        let r = TransportResponse::new(502, json!("Bad gateway"));
        assert_eq!(r.message(), Some("Bad gateway"));

        let r = TransportResponse::new(500, json!(""));
        assert_eq!(r.message(), None);
    }
}
