//! Sequential catalog runner.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::PromptCatalog;
use crate::constants::{PROMPT_PREVIEW_CHARS, RATE_LIMIT_DELAY};
use crate::fs_utils::artifact_exists;
use crate::models::{BatchReport, EntryOutcome};
use crate::provider::ImageProvider;

/// Client-side pacing applied after every catalog entry.
#[async_trait]
pub trait Throttle: Send {
    async fn pause(&mut self);
}

/// Sleeps for the same interval every time.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(RATE_LIMIT_DELAY)
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&mut self) {
        tokio::time::sleep(self.delay).await;
    }
}

pub struct BatchGenerator<T: Throttle = FixedDelay> {
    throttle: T,
}

impl BatchGenerator {
    pub fn new() -> Self {
        Self::with_throttle(FixedDelay::default())
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Throttle> BatchGenerator<T> {
    pub fn with_throttle(throttle: T) -> Self {
        Self { throttle }
    }

    /// Processes every entry in catalog order. Existing files count as successes
    /// without a provider call; failures are recorded and the loop moves on.
    pub async fn run(
        &mut self,
        catalog: &PromptCatalog,
        output_dir: &Path,
        provider: &dyn ImageProvider,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        let total = catalog.len();

        for (index, entry) in catalog.entries().iter().enumerate() {
            let label = format!("[{} {}/{}]", catalog.name(), index + 1, total);
            let destination = output_dir.join(&entry.filename);

            let outcome = if artifact_exists(&destination).await {
                println!("{} Skipping (exists): {}", label, entry.filename);
                EntryOutcome::Skipped
            } else {
                println!("{} Generating: {}", label, entry.filename);
                tracing::debug!(
                    provider = provider.name(),
                    "prompt: \"{}...\"",
                    prompt_preview(&entry.prompt)
                );
                if provider.generate(&entry.prompt, &destination).await {
                    EntryOutcome::Generated
                } else {
                    EntryOutcome::Failed
                }
            };

            report.record(entry.filename.as_str(), outcome);
            self.throttle.pause().await;
        }

        report
    }
}

fn prompt_preview(prompt: &str) -> String {
    prompt.chars().take(PROMPT_PREVIEW_CHARS).collect()
}
