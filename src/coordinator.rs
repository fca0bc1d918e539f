use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use duration_string::DurationString;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, instrument, warn};

use crate::counter::CategoryCounter;
use crate::report::{Report, ReportSection};
use crate::types::{CategoryGroup, RankedResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinatorConfig {
    /// Maximum number of categories counted at the same time.
    /// Defaults to the available parallelism of the machine.
    #[serde(default)]
    pub max_parallelism: Option<usize>,
    /// A category still counting after this long gets an empty section.
    #[serde(default)]
    pub task_timeout: Option<DurationString>,
}

impl CoordinatorConfig {
    pub fn parallelism(&self) -> usize {
        self.max_parallelism.filter(|n| *n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.task_timeout.clone().map(Duration::from)
    }
}

/// Why a category ended up with an empty section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryFailure {
    #[error("counting task panicked: {0}")]
    Panicked(String),
    #[error("counting task timed out after {0:?}")]
    TimedOut(Duration),
    #[error("counting task was cancelled")]
    Cancelled,
}

impl From<JoinError> for CategoryFailure {
    fn from(e: JoinError) -> Self {
        if e.is_panic() {
            let payload = e.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            CategoryFailure::Panicked(message)
        } else {
            CategoryFailure::Cancelled
        }
    }
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("Worker pool closed before every category was scheduled")]
    PoolClosed(#[from] AcquireError),
    #[error("Cannot join a category task: {0}")]
    Join(#[from] JoinError),
    #[error("Expected {expected} category results, got {got}")]
    MissingResults { expected: usize, got: usize },
}

struct TaskOutcome {
    position: usize,
    category: String,
    result: Result<RankedResult, CategoryFailure>,
}

/// Counts every category of `groups` in parallel and collects the results.
///
/// Each category runs on the blocking pool, at most
/// [`CoordinatorConfig::parallelism`] at a time; the remaining categories wait
/// for a permit in first-seen order. A timed out category gives its permit
/// back right away, while its thread runs to completion unobserved. Tasks hand their result back by value and
/// the report is assembled here, sequentially, as tasks join. A panicking or
/// timed out category gets an empty section and doesn't affect the others.
///
/// Sections are in completion order: callers wanting a stable order have to
/// [`Report::sort`] it.
#[instrument(skip_all, fields(categories = groups.len()))]
pub async fn count_categories<C: CategoryCounter>(
    groups: CategoryGroup,
    counter: Arc<C>,
    config: &CoordinatorConfig,
) -> Result<Report, CoordinatorError> {
    let expected = groups.len();
    let parallelism = config.parallelism();
    let timeout = config.timeout();
    let permits = Arc::new(Semaphore::new(parallelism));

    info!("Counting {} categories, {} at a time", expected, parallelism);

    let mut tasks = JoinSet::new();
    for (position, group) in groups.into_iter().enumerate() {
        let permit = Arc::clone(&permits).acquire_owned().await?;
        let counter = Arc::clone(&counter);

        tasks.spawn(async move {
            // Held by this task, not by the blocking thread: a timed out
            // category frees its slot for the categories still waiting.
            let _permit = permit;
            let category = group.category.clone();
            let handle = tokio::task::spawn_blocking(move || {
                counter.count(&group.category, &group.articles)
            });

            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, handle).await {
                    Ok(joined) => joined.map_err(CategoryFailure::from),
                    Err(_) => {
                        warn!(
                            "Category {} timed out after {:?}, counting goes on in the background",
                            category, limit
                        );
                        Err(CategoryFailure::TimedOut(limit))
                    }
                },
                None => handle.await.map_err(CategoryFailure::from),
            };

            TaskOutcome {
                position,
                category,
                result,
            }
        });
    }

    let mut report = Report::new();
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined?;
        let (ranked, failure) = match outcome.result {
            Ok(ranked) => (ranked, None),
            Err(failure) => {
                error!("Category {} failed: {}", outcome.category, failure);
                (vec![], Some(failure))
            }
        };
        report.push(ReportSection {
            category: outcome.category,
            position: outcome.position,
            ranked,
            failure,
        });
    }

    if report.len() != expected {
        return Err(CoordinatorError::MissingResults {
            expected,
            got: report.len(),
        });
    }

    let failed = report.failures().count();
    if failed > 0 {
        warn!("{} of {} categories failed", failed, expected);
    }

    Ok(report)
}
