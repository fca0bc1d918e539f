use tracing::{debug, instrument};

use crate::types::{ArticleRecord, CategoryGroup};

/// Groups `records` by category.
///
/// Categories appear in first-seen order; each category keeps its records in
/// input order. Records with an empty category are expected to be filtered
/// out by the loader already.
#[instrument(skip_all, fields(records = records.len()))]
pub fn partition(records: Vec<ArticleRecord>) -> CategoryGroup {
    let mut group = CategoryGroup::new();
    for record in records {
        group.push(record);
    }

    debug!("Partitioned into {} categories", group.len());

    group
}
