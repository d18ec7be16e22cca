use std::path::PathBuf;

/// Reasons a single catalog entry could not be produced.
///
/// Every variant is folded into a `false` result at the provider boundary; the
/// distinction only survives in the logged diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("no image in response")]
    NoImage,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sdk")]
    #[error("{0:#}")]
    Sdk(anyhow::Error),
}

/// Conditions that stop the program before any entry is processed.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("unable to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("invalid prompt catalog '{name}': {reason}")]
    Catalog { name: String, reason: String },
}
