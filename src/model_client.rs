use std::env;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::chat::responder::{Responder, ResponderError};

/// Hosted endpoint for the default conversational model.
const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

/// Upper bound on generated output length, in tokens. The endpoint handles
/// padding and special tokens; we only see decoded text.
const MAX_LENGTH: u32 = 60;

/// Client for a hosted text-generation model. The model is treated as an
/// opaque black box: text in, text out, with an internally fixed maximum
/// output length.
pub struct ModelClient {
    endpoint: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl ModelClient {
    /// Build a client from the environment: `MODEL_ENDPOINT` overrides the
    /// default hosted model, `HF_API_TOKEN` adds bearer authentication.
    pub fn new() -> Self {
        let endpoint =
            env::var("MODEL_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let api_token = env::var("HF_API_TOKEN").ok();

        Self {
            endpoint,
            api_token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Responder for ModelClient {
    async fn reply(&self, input: &str) -> Result<String, ResponderError> {
        let request_body = generation_request(input);

        debug!(endpoint = %self.endpoint, "sending generation request");

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            error!(status = status.as_u16(), body = %body, "model endpoint returned an error");
            return Err(endpoint_failure(status, body));
        }

        let payload: Value = response.json().await?;
        debug!("received generation response");

        extract_generated_text(&payload)
    }
}

/// Build the generation request body, with output length bounded by
/// `MAX_LENGTH`.
fn generation_request(input: &str) -> Value {
    json!({
        "inputs": input,
        "parameters": {
            "max_length": MAX_LENGTH,
        },
    })
}

/// Map a non-success endpoint status to the typed responder error.
fn endpoint_failure(status: reqwest::StatusCode, body: String) -> ResponderError {
    ResponderError::Endpoint {
        status: status.as_u16(),
        body,
    }
}

/// The endpoint replies with `[{"generated_text": "..."}]`.
fn extract_generated_text(payload: &Value) -> Result<String, ResponderError> {
    payload
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|first| first.get("generated_text"))
        .and_then(|text| text.as_str())
        .map(|text| text.trim().to_string())
        .ok_or_else(|| ResponderError::Malformed(payload.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_bounded_max_length() {
        let body = generation_request("Hello");
        assert_eq!(body["inputs"], "Hello");
        assert_eq!(body["parameters"]["max_length"], 60);
    }

    #[test]
    fn non_success_status_maps_to_endpoint_error() {
        let err = endpoint_failure(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            "model is loading".into(),
        );
        match &err {
            ResponderError::Endpoint { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "model is loading");
            }
            other => panic!("expected endpoint error, got {other:?}"),
        }
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("model is loading"));
    }

    #[test]
    fn extracts_text_from_generation_payload() {
        let payload = json!([{ "generated_text": "  Hi there! " }]);
        assert_eq!(extract_generated_text(&payload).unwrap(), "Hi there!");
    }

    #[test]
    fn rejects_payload_without_candidates() {
        let payload = json!({ "error": "loading" });
        let err = extract_generated_text(&payload).unwrap_err();
        assert!(err.to_string().contains("malformed model response"));
        assert!(err.to_string().contains("loading"));
    }

    #[test]
    fn rejects_empty_candidate_list() {
        let payload = json!([]);
        assert!(extract_generated_text(&payload).is_err());
    }
}
