use std::collections::BTreeSet;
use time::OffsetDateTime;

/// A normalized feed entry.
///
/// Produced once per feed item by [`normalize`](crate::normalize) and never
/// mutated afterwards. All of the "is this field present" branching happens
/// during normalization, so consumers only ever see concrete values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry title, `"Untitled"` when the feed item had none
    pub title: String,
    /// Literal (unescaped) HTML fragment, possibly empty
    pub content: String,
    /// Publication timestamp in UTC, `None` for undated entries
    pub published_at: Option<OffsetDateTime>,
    /// Link back to the original, empty when absent
    pub source_link: String,
    /// Normalized tag terms
    pub tags: BTreeSet<String>,
}
impl AsRef<Entry> for Entry {
    fn as_ref(&self) -> &Entry {
        self
    }
}
impl Entry {
    /// Calendar date of publication, formatted as `YYYY-MM-DD`.
    pub fn published_date(&self) -> Option<String> {
        self.published_at.map(|at| {
            let date = at.date();
            format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
        })
    }
}
