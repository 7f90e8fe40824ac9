//! Storage module for generated reports
//!
//! This module keeps finished reports available for download:
//! - A `ReportStore` trait with put/get/evict operations
//! - An in-memory implementation with time-boxed retention

mod memory;
mod traits;

pub use memory::MemoryReportStore;
pub use traits::{ReportStore, StorageError, StorageResult};
