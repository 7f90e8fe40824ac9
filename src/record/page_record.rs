use crate::record::field::{FieldKind, MetaField, RobotsField};
use std::fmt;

/// Outcome status of a page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    /// HTTP status code of the final response
    Code(u16),
    /// Every attempt failed before a response was received
    Error,
}

impl PageStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Error => None,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// SEO signals extracted from one page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    pub title: MetaField,
    pub description: MetaField,
    pub h1: MetaField,
    pub canonical: MetaField,
    pub robots: RobotsField,
}

impl PageMetadata {
    /// Metadata for a page whose fetch failed: every field empty
    pub fn fetch_failed() -> Self {
        Self {
            robots: RobotsField::FetchFailed,
            ..Self::default()
        }
    }

    /// Metadata for a page that was fetched but could not be parsed
    pub fn extraction_error() -> Self {
        Self {
            title: MetaField::ExtractionError,
            description: MetaField::ExtractionError,
            h1: MetaField::ExtractionError,
            canonical: MetaField::ExtractionError,
            robots: RobotsField::ExtractionError,
        }
    }

    pub fn field(&self, kind: FieldKind) -> &MetaField {
        match kind {
            FieldKind::Title => &self.title,
            FieldKind::Description => &self.description,
            FieldKind::H1 => &self.h1,
            FieldKind::Canonical => &self.canonical,
        }
    }
}

/// The audit result for one sitemap URL
///
/// Created exactly once when the URL's attempt sequence completes and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub original_url: String,
    /// URL after following redirects
    pub final_url: String,
    pub status: PageStatus,
    /// Number of intermediate redirect responses
    pub redirect_count: u32,
    pub metadata: PageMetadata,
}

impl PageRecord {
    /// Record for a URL whose every attempt failed
    pub fn failed(url: &str) -> Self {
        Self {
            original_url: url.to_string(),
            final_url: url.to_string(),
            status: PageStatus::Error,
            redirect_count: 0,
            metadata: PageMetadata::fetch_failed(),
        }
    }

    pub fn rendered_title(&self) -> String {
        self.metadata.title.render(FieldKind::Title)
    }

    pub fn rendered_description(&self) -> String {
        self.metadata.description.render(FieldKind::Description)
    }
}
