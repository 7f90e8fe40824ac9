//! Page record types
//!
//! This module provides the data produced for every audited URL.
//!
//! # Components
//!
//! - `PageRecord`: fetch outcome plus extracted metadata for one URL
//! - `MetaField`: a field with zero, one or many occurrences and its issue tag
//! - `RobotsField`: robots meta directives and the derived `NoindexStatus`

mod field;
mod page_record;

// Re-export main types
pub use field::{
    FieldIssue, FieldKind, MetaField, NoindexStatus, RobotsField, EXTRACTION_ERROR_TEXT,
    ISSUE_MARKER,
};
pub use page_record::{PageMetadata, PageRecord, PageStatus};
