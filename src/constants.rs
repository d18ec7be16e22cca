use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_HELP_URL: &str = "https://makersuite.google.com/app/apikey";

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp-image-generation";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const RESPONSE_MODALITIES: [&str; 2] = ["Text", "Image"];

/// Upper bound for a single hand-built REST call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(120);
/// Pause after every catalog entry.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(2);

pub const IMAGES_DIR: &str = "public/images";
pub const COUNTRIES_DIR_NAME: &str = "countries";
pub const STORIES_DIR_NAME: &str = "stories";

pub const COUNTRIES_CATALOG: &str = include_str!("../catalog/countries.json");
pub const STORIES_CATALOG: &str = include_str!("../catalog/stories.json");

pub const BANNER_WIDTH: usize = 60;
pub const PROMPT_PREVIEW_CHARS: usize = 80;
