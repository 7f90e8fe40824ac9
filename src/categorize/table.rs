use crate::categorize::MAIN_CATEGORY;
use crate::config::CategoryEntry;

/// Category patterns, sorted once for matching
///
/// Patterns are tested longest first so a specific pattern such as
/// `/team-members/` wins over a shorter one such as `/team/` that also
/// occurs in the path. Patterns of equal length keep their declared order.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// Categories in presentation order
    entries: Vec<CategoryEntry>,
    /// Indices into `entries`, longest pattern first
    match_order: Vec<usize>,
}

impl CategoryTable {
    pub fn new(entries: Vec<CategoryEntry>) -> Self {
        let mut match_order: Vec<usize> = (0..entries.len()).collect();
        // Stable sort keeps declared order among equal lengths
        match_order.sort_by_key(|&i| std::cmp::Reverse(entries[i].pattern.chars().count()));

        Self {
            entries,
            match_order,
        }
    }

    /// Returns the index of the category whose pattern matches `path`, or
    /// `None` when the path belongs to the catch-all category
    pub fn classify(&self, path: &str) -> Option<usize> {
        self.match_order
            .iter()
            .copied()
            .find(|&i| path.contains(self.entries[i].pattern.as_str()))
    }

    /// Name of the category `path` belongs to
    pub fn category_name(&self, path: &str) -> &str {
        self.classify(path)
            .map(|i| self.entries[i].name.as_str())
            .unwrap_or(MAIN_CATEGORY)
    }

    /// Declared categories in presentation order (catch-all excluded)
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Declared categories in the order patterns are tested
    pub fn match_order(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.match_order.iter().map(|&i| &self.entries[i])
    }

    /// Every bucket name in presentation order, catch-all first
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(MAIN_CATEGORY).chain(self.entries.iter().map(|e| e.name.as_str()))
    }
}
