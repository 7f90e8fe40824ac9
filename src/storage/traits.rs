//! Report store trait and error types
//!
//! This module defines the trait interface for keeping generated reports
//! available for download, and its error type.

use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Report store lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for report store implementations
///
/// Reports are keyed by their download filename. Implementations must be
/// safe to share between request handlers.
pub trait ReportStore: Send + Sync {
    /// Stores a report, replacing any report with the same filename
    fn put(&self, filename: &str, bytes: Vec<u8>) -> StorageResult<()>;

    /// Returns the report stored under `filename`, unless it has expired
    fn get(&self, filename: &str) -> StorageResult<Option<Arc<[u8]>>>;

    /// Removes a report
    ///
    /// # Returns
    ///
    /// `true` if a report was stored under `filename`
    fn evict(&self, filename: &str) -> StorageResult<bool>;

    /// Removes every expired report
    ///
    /// # Returns
    ///
    /// The number of reports removed
    fn evict_expired(&self) -> StorageResult<usize>;

    /// Number of reports currently held, expired ones included
    fn len(&self) -> StorageResult<usize>;

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}
