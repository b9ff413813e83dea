use std::fmt::{Display, Formatter, Result as FmtResult};

/// Whether an entry is a dated blog post or a standalone page.
///
/// Decided exactly once per entry by [`classify`](crate::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// Standalone page (about, contact, ...)
    Page,
    /// Blog post, the common case
    Post,
}
impl Classification {
    /// Returns the display string for the classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Page => "Page",
            Classification::Post => "Post",
        }
    }
}
impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
