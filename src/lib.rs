pub mod app;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs_utils;
pub mod models;
pub mod provider;

pub use app::{default_categories, run, run_categories, Category, CategoryReport};
pub use batch::{BatchGenerator, FixedDelay, Throttle};
pub use catalog::PromptCatalog;
pub use config::{Credential, OutputLayout, ProviderSettings};
pub use constants::{
    API_KEY_ENV, API_KEY_HELP_URL, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, HTTP_TIMEOUT,
    RATE_LIMIT_DELAY,
};
pub use error::{GenerateError, StartupError};
pub use models::{BatchReport, CatalogEntry, EntryOutcome, EntryReport};
pub use provider::{select_provider, ImageProvider, RawHttpProvider};
#[cfg(feature = "sdk")]
pub use provider::SdkProvider;
