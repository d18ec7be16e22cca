//! Hand-built `generateContent` call for builds without the llmapi client.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::{Credential, ProviderSettings};
use crate::constants::{API_KEY_ENV, RESPONSE_MODALITIES};
use crate::error::{GenerateError, StartupError};

use super::ImageProvider;

pub struct RawHttpProvider {
    client: Client,
    credential: Option<Credential>,
    settings: ProviderSettings,
}

impl RawHttpProvider {
    pub fn new(
        credential: Option<Credential>,
        settings: ProviderSettings,
    ) -> Result<Self, StartupError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(StartupError::HttpClient)?;

        Ok(Self {
            client,
            credential,
            settings,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseModalities": RESPONSE_MODALITIES
        }
    })
}

/// Pulls `candidates[0].content.parts[*].inlineData.data` out of a response body.
fn extract_image_data(body: &Value) -> Result<Vec<u8>, GenerateError> {
    let parts = body
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or(GenerateError::NoImage)?;

    let data = parts
        .iter()
        .find_map(|part| {
            part.get("inlineData")?
                .get("data")?
                .as_str()
                .filter(|data| !data.trim().is_empty())
        })
        .ok_or(GenerateError::NoImage)?;

    Ok(BASE64_ENGINE.decode(data.trim())?)
}

#[async_trait]
impl ImageProvider for RawHttpProvider {
    async fn fetch_image(&self, prompt: &str) -> Result<Vec<u8>, GenerateError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(GenerateError::MissingCredential(API_KEY_ENV))?;

        // the key rides in the query string; strip the URL from errors so it is never printed
        let response = self
            .client
            .post(self.url())
            .query(&[("key", credential.expose())])
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|err| err.without_url())?;

        let status = response.status();
        let text = response.text().await.map_err(|err| err.without_url())?;
        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        extract_image_data(&body)
    }

    fn name(&self) -> &str {
        "raw HTTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_matches_generate_content_shape() {
        assert_eq!(
            request_body("Sydney Opera House"),
            json!({
                "contents": [{ "parts": [{ "text": "Sydney Opera House" }] }],
                "generationConfig": { "responseModalities": ["Text", "Image"] }
            })
        );
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let provider = RawHttpProvider::new(
            None,
            ProviderSettings {
                endpoint: "http://127.0.0.1:1/v1beta/models/".into(),
                model: "img-model".into(),
                ..ProviderSettings::default()
            },
        )
        .unwrap();
        assert_eq!(
            provider.url(),
            "http://127.0.0.1:1/v1beta/models/img-model:generateContent"
        );
    }

    #[test]
    fn extracts_first_inline_part() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_image_data(&body).unwrap(),
            vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]
        );
    }

    #[test]
    fn blank_inline_part_is_passed_over() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/gif", "data": "" } },
                        { "inlineData": { "mimeType": "image/gif", "data": "R0lGODlh" } }
                    ]
                }
            }]
        });
        assert_eq!(extract_image_data(&body).unwrap(), b"GIF89a");
    }

    #[test]
    fn only_blank_inline_parts_is_no_image() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "  " } }] } }]
        });
        assert!(matches!(extract_image_data(&body), Err(GenerateError::NoImage)));
    }

    #[test]
    fn missing_candidates_is_no_image() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(extract_image_data(&body), Err(GenerateError::NoImage)));
    }

    #[test]
    fn text_only_parts_is_no_image() {
        let body = json!({ "candidates": [{ "content": { "parts": [{ "text": "no" }] } }] });
        assert!(matches!(extract_image_data(&body), Err(GenerateError::NoImage)));
    }

    #[test]
    fn corrupt_payload_is_a_decode_error() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "@@@" } }] } }]
        });
        assert!(matches!(extract_image_data(&body), Err(GenerateError::Decode(_))));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        // nothing listens on port 1; reaching the network would give an Http error instead
        let provider = RawHttpProvider::new(
            None,
            ProviderSettings {
                endpoint: "http://127.0.0.1:1".into(),
                ..ProviderSettings::default()
            },
        )
        .unwrap();

        let err = provider.fetch_image("anything").await.unwrap_err();
        assert!(matches!(err, GenerateError::MissingCredential("GEMINI_API_KEY")));
    }
}
