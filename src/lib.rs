pub mod capped_heap;
pub mod config;
pub mod coordinator;
pub mod counter;
pub mod loader;
pub mod partitioner;
pub mod report;
pub mod types;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info, instrument};

pub use crate::config::{load_config, ConfigOverrides, NewsWordsConfig};
use crate::coordinator::count_categories;
use crate::counter::FrequencyCounter;
use crate::loader::load_dataset;
use crate::partitioner::partition;
use crate::report::{HtmlReport, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub skipped_lines: usize,
    pub categories: usize,
    pub failed_categories: Vec<String>,
}

/// Loads, partitions and counts the dataset, returning the ordered report.
///
/// The stop word set is built once here and shared read-only by every
/// counting task.
#[instrument(skip_all, fields(input = ?config.input))]
pub async fn analyze(config: &NewsWordsConfig) -> Result<(Report, RunSummary)> {
    let tokenizer = nlp::build_tokenizer(config.stop_words_path.as_deref())
        .context("Cannot build the tokenizer")?;
    let counter = Arc::new(FrequencyCounter::new(Arc::new(tokenizer), config.top_n));

    let input = config.input.clone();
    let dataset = tokio::task::spawn_blocking(move || load_dataset(&input))
        .await
        .context("Dataset loader task failed")??;
    if dataset.is_empty() {
        error!("Failed to load data from: {:?}", config.input);
        bail!("No valid record found in {:?}", config.input);
    }

    let stats = dataset.stats;
    let groups = partition(dataset.records);
    info!("Found {} categories", groups.len());

    let mut report = count_categories(groups, counter, &config.coordinator)
        .await
        .context("Cannot collect the results of every category")?;
    report.sort(config.section_order);

    let summary = RunSummary {
        records: stats.loaded,
        skipped_lines: stats.skipped,
        categories: report.len(),
        failed_categories: report
            .failures()
            .map(|(category, _)| category.to_string())
            .collect(),
    };

    Ok((report, summary))
}

/// Full pipeline: analysis followed by the HTML report at `config.output`.
pub async fn run(config: NewsWordsConfig) -> Result<RunSummary> {
    let (report, summary) = analyze(&config).await?;

    let mut html = HtmlReport::new();
    report.write_to(&mut html)?;
    html.render(&config.output)?;

    info!("Processing complete.");

    Ok(summary)
}
