//! Image provider capability and the start-up choice between its variants.

mod http;
#[cfg(feature = "sdk")]
mod sdk;

pub use http::RawHttpProvider;
#[cfg(feature = "sdk")]
pub use sdk::SdkProvider;

use std::path::Path;

use async_trait::async_trait;

use crate::config::{Credential, ProviderSettings};
use crate::error::{GenerateError, StartupError};
use crate::fs_utils::{format_size_kb, write_image_atomic};

/// Turns a prompt into image bytes through a remote service.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Requests one image and returns its decoded bytes.
    async fn fetch_image(&self, prompt: &str) -> Result<Vec<u8>, GenerateError>;

    /// Short label for logs.
    fn name(&self) -> &str;

    /// Generates an image for `prompt` and stores it at `destination`.
    ///
    /// Returns `false` on any failure after printing a diagnostic; nothing is
    /// written in that case.
    async fn generate(&self, prompt: &str, destination: &Path) -> bool {
        let label = file_label(destination);

        let result = match self.fetch_image(prompt).await {
            Ok(bytes) if bytes.is_empty() => Err(GenerateError::NoImage),
            Ok(bytes) => write_image_atomic(destination, &bytes)
                .await
                .map_err(GenerateError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(size) => {
                println!("✓ Generated: {} ({})", label, format_size_kb(size));
                true
            }
            Err(GenerateError::NoImage) => {
                println!("✗ No image in response for: {}", label);
                false
            }
            Err(err) => {
                println!("✗ Error generating {}: {}", label, err);
                tracing::debug!(provider = self.name(), file = %label, "generation failed: {err:?}");
                false
            }
        }
    }
}

fn file_label(destination: &Path) -> String {
    destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| destination.display().to_string())
}

/// Builds the provider for this build: the llmapi client when the `sdk` feature
/// compiled it in, otherwise the hand-built REST call.
pub fn select_provider(
    credential: Option<Credential>,
    settings: ProviderSettings,
) -> Result<Box<dyn ImageProvider>, StartupError> {
    #[cfg(feature = "sdk")]
    let provider: Box<dyn ImageProvider> = Box::new(SdkProvider::new(credential, settings));

    #[cfg(not(feature = "sdk"))]
    let provider: Box<dyn ImageProvider> = Box::new(RawHttpProvider::new(credential, settings)?);

    tracing::info!("Using {} image provider", provider.name());
    Ok(provider)
}
