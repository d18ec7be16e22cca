mod api;
pub mod models;
pub use api::{
    build_generate_request, decode_inline_data, first_inline_data, response_to_text_data,
    send_generate_request,
};

use anyhow::Result;

use crate::types::{GenerationConfig, LLMClient};
use models::GeminiResponse;

/// Decoded image returned by an image-capable Gemini model.
#[derive(Clone, Debug)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub text: Option<String>,
}

pub async fn generate_content(
    client: &LLMClient,
    prompt: &str,
    config: Option<GenerationConfig>,
) -> Result<GeminiResponse> {
    let request = build_generate_request(prompt, config);
    send_generate_request(client, &request).await
}

/// Asks for text and image output and returns the first image, or `None` when the
/// model answered without one.
pub async fn generate_image(client: &LLMClient, prompt: &str) -> Result<Option<GeneratedImage>> {
    let response = generate_content(client, prompt, Some(GenerationConfig::text_and_image())).await?;
    extract_image(&response)
}

pub fn extract_image(response: &GeminiResponse) -> Result<Option<GeneratedImage>> {
    let Some(inline) = first_inline_data(response) else {
        return Ok(None);
    };
    let text = response_to_text_data(response)
        .ok()
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty());

    Ok(Some(GeneratedImage {
        mime_type: inline.mime_type.clone(),
        bytes: decode_inline_data(inline)?,
        text,
    }))
}
