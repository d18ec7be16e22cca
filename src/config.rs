use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_KEY_ENV, COUNTRIES_DIR_NAME, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, HTTP_TIMEOUT,
    IMAGES_DIR, STORIES_DIR_NAME,
};

/// The Gemini API key. Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Reads `GEMINI_API_KEY`; an unset or blank variable yields `None`.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV).ok().and_then(Self::new)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where and how providers reach the generation endpoint.
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

/// Output directories, one per image category.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    pub countries_dir: PathBuf,
    pub stories_dir: PathBuf,
}

impl OutputLayout {
    pub fn under(root: impl AsRef<Path>) -> Self {
        let images = root.as_ref().join(IMAGES_DIR);
        Self {
            countries_dir: images.join(COUNTRIES_DIR_NAME),
            stories_dir: images.join(STORIES_DIR_NAME),
        }
    }
}
