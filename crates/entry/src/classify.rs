use crate::models::{Classification, Entry};

/// Category term Blogger attaches to standalone pages in its Atom export.
pub const BLOGGER_PAGE_KIND: &str = "http://schemas.google.com/blogger/2008/kind#page";

/// Tag terms that mark an entry as a [`Page`](Classification::Page).
///
/// Matching is case-insensitive and exact; `"page"` matches `"Page"` but not
/// `"pages"` or `"homepage"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    page_markers: Vec<String>,
}
impl Default for ClassifierRules {
    fn default() -> Self {
        Self::new(["page", BLOGGER_PAGE_KIND])
    }
}
impl ClassifierRules {
    pub fn new(markers: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            page_markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn page_markers(&self) -> &[String] {
        &self.page_markers
    }

    fn is_page_marker(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.page_markers.iter().any(|marker| *marker == tag)
    }
}

/// Decides whether an entry is a post or a page. Pure and total.
///
/// First match wins:
/// 1. a tag equal to one of the page markers → [`Classification::Page`]
/// 2. a source link whose path contains a `/pages/` segment → [`Classification::Page`]
/// 3. anything else → [`Classification::Post`]
///
/// Tags are explicit metadata and always win over the link shape.
pub fn classify(entry: &Entry, rules: &ClassifierRules) -> Classification {
    if entry.tags.iter().any(|tag| rules.is_page_marker(tag)) {
        return Classification::Page;
    }
    if link_path(&entry.source_link).contains("/pages/") {
        return Classification::Page;
    }
    Classification::Post
}

/// Path portion of a link: scheme and authority removed, query and fragment
/// dropped. Relative links are returned as-is (minus query and fragment).
pub fn link_path(link: &str) -> &str {
    let link = link.split(['?', '#']).next().unwrap_or_default();
    match link.split_once("://") {
        Some((_scheme, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or_default(),
        None => link,
    }
}
