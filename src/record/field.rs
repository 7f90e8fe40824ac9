use std::fmt;

/// Prefix carried by every rendered issue marker
pub const ISSUE_MARKER: &str = "⚠";

/// Rendered text of a field whose page could not be parsed
pub const EXTRACTION_ERROR_TEXT: &str = "⚠ EXTRACTION ERROR";

/// The on-page tag a [`MetaField`] was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Title,
    Description,
    H1,
    Canonical,
}

impl FieldKind {
    /// Label used in the duplicate-occurrence marker
    fn duplicate_label(&self) -> &'static str {
        match self {
            Self::Title => "TITLES",
            Self::Description => "DESCRIPTIONS",
            Self::H1 => "H1 TAGS",
            Self::Canonical => "CANONICAL TAGS",
        }
    }
}

/// Issue attached to a field, kept separate from its values so presentation
/// never has to inspect rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// The tag occurred `count` (> 1) times
    Duplicate { count: usize },
    /// The page could not be parsed
    ExtractionError,
}

/// One extracted SEO field with zero, one or many occurrences
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetaField {
    /// Tag absent. Absence is not malformed, so it carries no issue.
    #[default]
    Empty,
    Single(String),
    /// Two or more occurrences, in document order
    Multiple(Vec<String>),
    ExtractionError,
}

impl MetaField {
    /// Builds a field from raw occurrences in document order
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::Empty,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    /// Number of raw occurrences
    pub fn count(&self) -> usize {
        match self {
            Self::Empty | Self::ExtractionError => 0,
            Self::Single(_) => 1,
            Self::Multiple(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn issue(&self) -> Option<FieldIssue> {
        match self {
            Self::Multiple(values) => Some(FieldIssue::Duplicate {
                count: values.len(),
            }),
            Self::ExtractionError => Some(FieldIssue::ExtractionError),
            Self::Empty | Self::Single(_) => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self.issue(), Some(FieldIssue::Duplicate { .. }))
    }

    /// The single value, if exactly one occurrence exists
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the field for display
    ///
    /// Multiple occurrences render as a marker naming the count followed by
    /// a numbered list, e.g. `"⚠ MULTIPLE H1 TAGS (2)\n1. Home\n2. Welcome"`.
    pub fn render(&self, kind: FieldKind) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Single(value) => value.clone(),
            Self::Multiple(values) => {
                let mut out = format!(
                    "{} MULTIPLE {} ({})",
                    ISSUE_MARKER,
                    kind.duplicate_label(),
                    values.len()
                );
                for (i, value) in values.iter().enumerate() {
                    out.push_str(&format!("\n{}. {}", i + 1, value));
                }
                out
            }
            Self::ExtractionError => EXTRACTION_ERROR_TEXT.to_string(),
        }
    }
}

/// Indexing directive of a page, derived from its robots meta tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoindexStatus {
    Yes,
    No,
    Error,
}

impl fmt::Display for NoindexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Robots meta information of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotsField {
    /// Parsed robots tags; `noindex` is set when any tag asks for it
    Directives { noindex: bool, tag_count: usize },
    /// The page was never fetched
    FetchFailed,
    ExtractionError,
}

impl Default for RobotsField {
    fn default() -> Self {
        Self::Directives {
            noindex: false,
            tag_count: 0,
        }
    }
}

impl RobotsField {
    pub fn status(&self) -> NoindexStatus {
        match self {
            Self::Directives { noindex: true, .. } => NoindexStatus::Yes,
            Self::Directives { noindex: false, .. } => NoindexStatus::No,
            Self::FetchFailed | Self::ExtractionError => NoindexStatus::Error,
        }
    }

    pub fn has_multiple_tags(&self) -> bool {
        matches!(self, Self::Directives { tag_count, .. } if *tag_count > 1)
    }

    pub fn issue(&self) -> Option<FieldIssue> {
        match self {
            Self::Directives { tag_count, .. } if *tag_count > 1 => {
                Some(FieldIssue::Duplicate { count: *tag_count })
            }
            Self::ExtractionError => Some(FieldIssue::ExtractionError),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Directives { tag_count, .. } if *tag_count > 1 => format!(
                "{} ({} MULTIPLE ROBOTS TAGS ({}))",
                self.status(),
                ISSUE_MARKER,
                tag_count
            ),
            Self::ExtractionError => EXTRACTION_ERROR_TEXT.to_string(),
            _ => self.status().to_string(),
        }
    }
}
