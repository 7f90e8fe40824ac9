//! Content categorization
//!
//! Every record is assigned to exactly one bucket by testing its original
//! URL's path against the category patterns, longest pattern first. Records
//! that match nothing land in the catch-all `Main` bucket.

mod table;

pub use table::CategoryTable;

use crate::record::PageRecord;
use crate::url::url_path;

/// Name of the catch-all bucket
pub const MAIN_CATEGORY: &str = "Main";

/// A named partition of page records
#[derive(Debug, Clone)]
pub struct Bucket<'a> {
    pub name: String,
    /// Records in the order they were appended
    pub records: Vec<&'a PageRecord>,
}

impl Bucket<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distributes records into buckets
///
/// Returns every bucket, empty ones included, in presentation order: `Main`
/// first, then the declared categories. Each record appears in exactly one
/// bucket, appended in input order.
pub fn categorize<'a>(table: &CategoryTable, records: &'a [PageRecord]) -> Vec<Bucket<'a>> {
    let mut buckets: Vec<Bucket<'a>> = table
        .bucket_names()
        .map(|name| Bucket {
            name: name.to_string(),
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let slot = match url_path(&record.original_url) {
            Some(path) => table.classify(&path).map_or(0, |i| i + 1),
            None => {
                tracing::debug!(
                    "Cannot parse {} for categorization, using {}",
                    record.original_url,
                    MAIN_CATEGORY
                );
                0
            }
        };
        buckets[slot].records.push(record);
    }

    buckets
}

/// Bucket sizes in presentation order, empty buckets omitted
pub fn category_counts(buckets: &[Bucket<'_>]) -> Vec<(String, usize)> {
    buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| (bucket.name.clone(), bucket.len()))
        .collect()
}
