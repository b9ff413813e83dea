//! Entries as handed over by the feed-parsing collaborator.
//!
//! Every field is optional. Feed parsers disagree on how tags are represented
//! (a bare term string or an object carrying a `term`), so [`RawTag`] accepts
//! both and [`normalize`](crate::normalize) flattens them.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// One item of the feed, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawEntry {
    pub title: Option<String>,
    /// Structured content blocks; only the first one is ever used.
    pub content: Vec<RawContent>,
    pub summary: Option<String>,
    /// Timestamp string, usually `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
    pub published: Option<String>,
    pub updated: Option<String>,
    pub tags: Vec<RawTag>,
    pub link: Option<String>,
}

/// A value-bearing content block (Atom `<content>`).
///
/// Other keys on the block, such as its content `type`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawContent {
    pub value: Option<String>,
}
impl RawContent {
    pub fn html(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()) }
    }
}

/// A tag/category in either of its upstream representations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawTag {
    Term(String),
    Category {
        term: Option<String>,
        scheme: Option<String>,
        label: Option<String>,
    },
}
impl RawTag {
    /// The tag's term, falling back to its label. `None` when both are absent
    /// or blank.
    pub fn term(&self) -> Option<&str> {
        let term = match self {
            Self::Term(term) => Some(term.as_str()),
            Self::Category { term, label, .. } => term
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .or(label.as_deref()),
        };
        term.map(str::trim).filter(|t| !t.is_empty())
    }
}
impl From<&str> for RawTag {
    fn from(term: &str) -> Self {
        Self::Term(term.to_string())
    }
}
