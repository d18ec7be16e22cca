//! Generation through the llmapi Gemini client.

use async_trait::async_trait;
use llmapi::LLMClient;

use crate::config::{Credential, ProviderSettings};
use crate::constants::API_KEY_ENV;
use crate::error::GenerateError;

use super::ImageProvider;

pub struct SdkProvider {
    client: Option<LLMClient>,
}

impl SdkProvider {
    pub fn new(credential: Option<Credential>, settings: ProviderSettings) -> Self {
        let client = credential.map(|credential| {
            LLMClient::new(credential.expose(), settings.endpoint, settings.model)
        });
        Self { client }
    }
}

#[async_trait]
impl ImageProvider for SdkProvider {
    async fn fetch_image(&self, prompt: &str) -> Result<Vec<u8>, GenerateError> {
        let client = self
            .client
            .as_ref()
            .ok_or(GenerateError::MissingCredential(API_KEY_ENV))?;

        let image = llmapi::generate_image(client, prompt)
            .await
            .map_err(GenerateError::Sdk)?
            .ok_or(GenerateError::NoImage)?;

        if let Some(text) = &image.text {
            tracing::debug!(mime_type = %image.mime_type, "model text alongside image: {text}");
        }
        Ok(image.bytes)
    }

    fn name(&self) -> &str {
        "native SDK"
    }
}
