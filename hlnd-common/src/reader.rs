//! Article reader pick-list and selection lookup

use crate::record::{ArticleRecord, RecordId};

pub struct SampleReader;

impl SampleReader {
    /// First `n` article texts in subset order, for the reader pick-list
    ///
    /// Records without text are skipped.
    pub fn sample_titles<'a>(subset: &[&'a ArticleRecord], n: usize) -> Vec<&'a str> {
        subset.iter().filter_map(|r| r.text()).take(n).collect()
    }

    /// Records behind `sample_titles`, so callers can keep the identifiers
    pub fn sample<'a>(subset: &[&'a ArticleRecord], n: usize) -> Vec<&'a ArticleRecord> {
        subset
            .iter()
            .copied()
            .filter(|r| r.text().is_some())
            .take(n)
            .collect()
    }

    /// Resolve a pick-list choice back to its record by exact text
    ///
    /// Text is not a unique key: when several articles share the same text
    /// the first one in subset order is returned. Prefer `resolve_by_id`
    /// where the caller kept the identifier.
    pub fn resolve<'a>(subset: &[&'a ArticleRecord], chosen_text: &str) -> Option<&'a ArticleRecord> {
        subset.iter().copied().find(|r| r.text() == Some(chosen_text))
    }

    /// Resolve by the identifier assigned at load time
    pub fn resolve_by_id<'a>(subset: &[&'a ArticleRecord], id: RecordId) -> Option<&'a ArticleRecord> {
        subset.iter().copied().find(|r| r.id == id)
    }
}
