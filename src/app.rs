//! Program flow: credential check, directory setup, one batch per category, summary.

use std::path::{Path, PathBuf};

use crate::batch::{BatchGenerator, Throttle};
use crate::catalog::PromptCatalog;
use crate::config::{Credential, OutputLayout, ProviderSettings};
use crate::constants::{API_KEY_ENV, BANNER_WIDTH};
use crate::error::StartupError;
use crate::fs_utils::ensure_output_dir;
use crate::models::BatchReport;
use crate::provider::{select_provider, ImageProvider};

/// One image category: a catalog and the directory its files land in.
#[derive(Clone, Debug)]
pub struct Category {
    pub title: &'static str,
    pub catalog: PromptCatalog,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct CategoryReport {
    pub title: &'static str,
    pub output_dir: PathBuf,
    pub report: BatchReport,
}

pub fn default_categories(layout: &OutputLayout) -> Result<Vec<Category>, StartupError> {
    Ok(vec![
        Category {
            title: "Country images",
            catalog: PromptCatalog::countries()?,
            output_dir: layout.countries_dir.clone(),
        },
        Category {
            title: "Story images",
            catalog: PromptCatalog::stories()?,
            output_dir: layout.stories_dir.clone(),
        },
    ])
}

/// Runs the built-in catalogs under `root` with the provider this build selects.
///
/// A missing credential stops everything before any directory is touched.
pub async fn run(
    credential: Option<Credential>,
    root: &Path,
) -> Result<Vec<CategoryReport>, StartupError> {
    print_rule();
    println!("Catalog Image Generation");
    print_rule();
    println!();

    let credential = credential.ok_or(StartupError::MissingCredential(API_KEY_ENV))?;
    let categories = default_categories(&OutputLayout::under(root))?;
    let provider = select_provider(Some(credential), ProviderSettings::default())?;

    let reports = run_categories(&categories, provider.as_ref(), &mut BatchGenerator::new()).await?;
    print_summary(&reports);
    Ok(reports)
}

/// Creates every output directory, then processes the categories in order.
pub async fn run_categories<T: Throttle>(
    categories: &[Category],
    provider: &dyn ImageProvider,
    generator: &mut BatchGenerator<T>,
) -> Result<Vec<CategoryReport>, StartupError> {
    for category in categories {
        if ensure_output_dir(&category.output_dir).await? {
            tracing::info!("Created output directory: {}", category.output_dir.display());
        }
    }

    let mut reports = Vec::with_capacity(categories.len());
    for category in categories {
        println!(
            "Generating {} {}...",
            category.catalog.len(),
            category.title.to_lowercase()
        );
        println!("Output directory: {}", category.output_dir.display());
        println!();

        let report = generator
            .run(&category.catalog, &category.output_dir, provider)
            .await;

        println!();
        println!(
            "{}: {}/{} generated",
            category.title,
            report.success_count(),
            report.total_count()
        );
        println!();

        reports.push(CategoryReport {
            title: category.title,
            output_dir: category.output_dir.clone(),
            report,
        });
    }

    Ok(reports)
}

fn print_rule() {
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn print_summary(reports: &[CategoryReport]) {
    print_rule();
    println!("Generation Summary");
    print_rule();

    for category in reports {
        println!("{}: {}", category.title, category.output_dir.display());
        println!(
            "Generated: {}/{}",
            category.report.success_count(),
            category.report.total_count()
        );
    }

    let failed: Vec<&str> = reports
        .iter()
        .flat_map(|category| category.report.failed())
        .collect();
    if !failed.is_empty() {
        println!();
        println!("Note: Some images failed to generate: {}", failed.join(", "));
        println!("This may be due to API quotas or content policies.");
        println!("Run again to retry; existing images are skipped.");
    }
}
