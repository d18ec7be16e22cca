use anyhow::{Context, Result};

use crate::types::{GenerationConfig, LLMClient};
use crate::utils::decode_base64;

use super::models::{
    GeminiRequest, GeminiResponse, InlineData, RequestContent, RequestPart,
};

pub fn build_generate_request(prompt: &str, config: Option<GenerationConfig>) -> GeminiRequest {
    GeminiRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: prompt.to_owned(),
            }],
        }],
        generation_config: config,
    }
}

fn generate_url(api_client: &LLMClient) -> String {
    let endpoint = api_client.endpoint().trim_end_matches('/');
    let model = api_client
        .default_model()
        .strip_prefix("models/")
        .unwrap_or(api_client.default_model());
    format!("{}/{}:generateContent", endpoint, model)
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    request: &GeminiRequest,
) -> Result<GeminiResponse> {
    let url = generate_url(api_client);

    let response = api_client
        .http
        .post(url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(|err| err.without_url())
        .context("HTTP request (generateContent) failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading generateContent response body failed")?;

    if !status.is_success() {
        return Err(anyhow::anyhow!(
            "Gemini generateContent failed: status {} body {}",
            status,
            response_text
        ));
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    Ok(response)
}

/// Returns the first inline payload of the first candidate, if the model produced one.
pub fn first_inline_data(response: &GeminiResponse) -> Option<&InlineData> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .find_map(|part| {
            part.inline_data
                .as_ref()
                .filter(|inline| !inline.data.trim().is_empty())
        })
}

pub fn decode_inline_data(inline_data: &InlineData) -> Result<Vec<u8>> {
    decode_base64(inline_data.data.trim())
}

pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    //get only 1 text response
    if let Some(candidate) = response.candidates.first() {
        let mut full_text = String::new();
        for part in candidate.content.iter().flat_map(|c| c.parts.iter()) {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        Ok(full_text)
    } else {
        Err(anyhow::anyhow!("No candidates found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let request = build_generate_request("a harbour at dusk", Some(GenerationConfig::text_and_image()));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "a harbour at dusk" }] }],
                "generationConfig": { "responseModalities": ["Text", "Image"] }
            })
        );
    }

    #[test]
    fn request_without_config_omits_generation_config() {
        let body = serde_json::to_value(build_generate_request("hi", None)).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn url_strips_models_prefix_and_trailing_slash() {
        let client = LLMClient::new("k", "https://example.test/v1beta/models/", "models/img-1");
        assert_eq!(
            generate_url(&client),
            "https://example.test/v1beta/models/img-1:generateContent"
        );
    }

    #[test]
    fn finds_first_inline_part_after_text() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your picture" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } },
                        { "inlineData": { "mimeType": "image/png", "data": "BAUG" } }
                    ]
                }
            }]
        }));

        let inline = first_inline_data(&response).unwrap();
        assert_eq!(decode_inline_data(inline).unwrap(), vec![1, 2, 3]);
        assert_eq!(response_to_text_data(&response).unwrap(), "Here is your picture");
    }

    #[test]
    fn only_first_candidate_is_considered() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "sorry" }] } },
                { "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AQID" } }] } }
            ]
        }));
        assert!(first_inline_data(&response).is_none());
    }

    #[test]
    fn missing_candidates_yield_no_image() {
        let response = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert!(response.candidates.is_empty());
        assert!(first_inline_data(&response).is_none());
        assert!(response_to_text_data(&response).is_err());
    }

    #[test]
    fn blocked_candidate_without_content_parses() {
        let response = parse(json!({ "candidates": [{ "finishReason": "IMAGE_SAFETY" }] }));
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("IMAGE_SAFETY"));
        assert!(first_inline_data(&response).is_none());
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let inline = InlineData {
            mime_type: "image/png".into(),
            data: "not base64!!".into(),
        };
        assert!(decode_inline_data(&inline).is_err());
    }
}
