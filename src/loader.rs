use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::types::ArticleRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot read dataset at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    pub loaded: usize,
    /// Lines that are not a valid record: bad JSON, bad UTF-8, missing or empty category.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<ArticleRecord>,
    pub stats: LoadStats,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[instrument(level = "info")]
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(BufReader::new(file))?;
    info!(
        "Loaded {} records from {:?}, skipped {} lines",
        dataset.stats.loaded, path, dataset.stats.skipped
    );

    Ok(dataset)
}

/// Parses one JSON object per line. Invalid lines are logged and skipped,
/// blank lines are ignored. Only I/O failures are errors.
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset, LoadError> {
    let mut dataset = Dataset::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line_number = index + 1;
        let bytes = line.map_err(|source| LoadError::Read {
            line: line_number,
            source,
        })?;

        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text.trim(),
            Err(e) => {
                error!("Invalid UTF-8 at line {}: {}", line_number, e);
                dataset.stats.skipped += 1;
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }

        match parse_record(text) {
            Ok(record) => {
                dataset.records.push(record);
                dataset.stats.loaded += 1;
            }
            Err(reason) => {
                error!("Skipping line {}: {}", line_number, reason);
                dataset.stats.skipped += 1;
            }
        }
    }

    if dataset.stats.skipped > 0 {
        warn!("{} lines were skipped", dataset.stats.skipped);
    }

    Ok(dataset)
}

fn parse_record(line: &str) -> Result<ArticleRecord, String> {
    let record: ArticleRecord =
        serde_json::from_str(line).map_err(|e| format!("Error decoding JSON: {e}"))?;
    if record.category.trim().is_empty() {
        return Err("empty category".to_string());
    }
    Ok(record)
}
