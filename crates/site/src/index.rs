//! The table of contents.
//!
//! Lists every successfully written entry in two sections. Pages come first,
//! alphabetically by title. Posts follow, newest first, with undated posts
//! after all dated ones. Ties fall back to title and then link target, so the
//! index is byte-identical for the same set of records regardless of the
//! order they were collected in.

use crate::error::Result;
use crate::path::SitePath;
use crate::render::{RenderedPage, Renderer};
use feedsite_entry::{Classification, Entry};
use std::cmp::Ordering;
use time::OffsetDateTime;

/// One line in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub title: String,
    /// Link target relative to the index file.
    pub href: String,
    pub classification: Classification,
    pub date: Option<OffsetDateTime>,
}
impl IndexRecord {
    pub fn new(entry: &Entry, classification: Classification, path: &SitePath) -> Self {
        Self {
            title: entry.title.clone(),
            href: path.as_str().to_string(),
            classification,
            date: entry.published_at,
        }
    }

    /// Publication date as `YYYY-MM-DD`.
    pub fn display_date(&self) -> Option<String> {
        self.date.map(|at| format!("{:04}-{:02}-{:02}", at.year(), u8::from(at.month()), at.day()))
    }

    fn by_title(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title).then_with(|| self.href.cmp(&other.href))
    }

    fn newest_first(&self, other: &Self) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => b.cmp(&a).then_with(|| self.by_title(other)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.by_title(other),
        }
    }
}

/// Splits records into the ordered pages and posts sections.
pub fn sections(records: &[IndexRecord]) -> (Vec<&IndexRecord>, Vec<&IndexRecord>) {
    let (mut pages, mut posts): (Vec<_>, Vec<_>) =
        records.iter().partition(|record| record.classification == Classification::Page);
    pages.sort_by(|a, b| a.by_title(b));
    posts.sort_by(|a, b| a.newest_first(b));
    (pages, posts)
}

/// Renders the table of contents for the given records.
pub fn build_index(records: &[IndexRecord], renderer: &Renderer, title: &str) -> Result<RenderedPage> {
    let (pages, posts) = sections(records);
    tracing::debug!(pages = pages.len(), posts = posts.len(), "Rendering index");
    renderer.render_index(title, &pages, &posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(title: &str, href: &str, classification: Classification, date: Option<OffsetDateTime>) -> IndexRecord {
        IndexRecord {
            title: title.to_string(),
            href: href.to_string(),
            classification,
            date,
        }
    }

    fn titles(section: &[&IndexRecord]) -> Vec<String> {
        section.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_pages_sorted_by_title() {
        let records = [
            record("Contact", "pages/contact.html", Classification::Page, None),
            record("About", "pages/about.html", Classification::Page, Some(datetime!(2020-01-01 00:00 UTC))),
            record("Colophon", "pages/colophon.html", Classification::Page, None),
        ];
        let (pages, posts) = sections(&records);
        assert_eq!(titles(&pages), ["About", "Colophon", "Contact"]);
        assert!(posts.is_empty());
    }

    #[test]
    fn test_posts_newest_first_undated_last() {
        let records = [
            record("Undated B", "posts/undated-b.html", Classification::Post, None),
            record("Old", "posts/2023/01/old.html", Classification::Post, Some(datetime!(2023-01-05 12:00 UTC))),
            record("Undated A", "posts/undated-a.html", Classification::Post, None),
            record("New", "posts/2024/03/new.html", Classification::Post, Some(datetime!(2024-03-01 10:00 UTC))),
            record("Middle", "posts/2023/06/middle.html", Classification::Post, Some(datetime!(2023-06-15 08:00 UTC))),
        ];
        let (_, posts) = sections(&records);
        assert_eq!(titles(&posts), ["New", "Middle", "Old", "Undated A", "Undated B"]);
    }

    #[test]
    fn test_ties_broken_by_title_then_href() {
        let at = Some(datetime!(2024-03-01 10:00 UTC));
        let records = [
            record("Same", "posts/2024/03/same-2.html", Classification::Post, at),
            record("Beta", "posts/2024/03/beta.html", Classification::Post, at),
            record("Same", "posts/2024/03/same.html", Classification::Post, at),
        ];
        let (_, posts) = sections(&records);
        let hrefs: Vec<_> = posts.iter().map(|r| r.href.as_str()).collect();
        assert_eq!(hrefs, ["posts/2024/03/beta.html", "posts/2024/03/same-2.html", "posts/2024/03/same.html"]);
    }

    #[test]
    fn test_index_independent_of_record_order() {
        let renderer = Renderer::new().unwrap();
        let mut records = vec![
            record("About", "pages/about.html", Classification::Page, None),
            record("Hello World", "posts/2024/03/hello-world.html", Classification::Post, Some(datetime!(2024-03-01 10:00 UTC))),
            record("Draft", "posts/draft.html", Classification::Post, None),
        ];
        let forward = build_index(&records, &renderer, "Contents").unwrap();
        records.reverse();
        let backward = build_index(&records, &renderer, "Contents").unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_index_markup() {
        let renderer = Renderer::new().unwrap();
        let records = [
            record("Fish & Chips", "pages/fish-chips.html", Classification::Page, None),
            record("Hello World", "posts/2024/03/hello-world.html", Classification::Post, Some(datetime!(2024-03-01 10:00 UTC))),
        ];
        let index = build_index(&records, &renderer, "My <Site>").unwrap();
        let html = index.as_str();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My &lt;Site&gt;</title>"));
        assert!(html.contains("<a href=\"pages/fish-chips.html\">Fish &amp; Chips</a>"));
        assert!(html.contains(
            "<a href=\"posts/2024/03/hello-world.html\">Hello World</a> <time datetime=\"2024-03-01\">2024-03-01</time>"
        ));
        let pages_at = html.find("<h2>Pages</h2>").unwrap();
        let posts_at = html.find("<h2>Posts</h2>").unwrap();
        assert!(pages_at < posts_at);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let renderer = Renderer::new().unwrap();
        let empty = build_index(&[], &renderer, "Contents").unwrap();
        assert!(!empty.as_str().contains("<h2>"));
        assert!(empty.as_str().contains("<h1>Contents</h1>"));

        let posts_only = [record("Post", "posts/post.html", Classification::Post, None)];
        let html = build_index(&posts_only, &renderer, "Contents").unwrap();
        assert!(!html.as_str().contains("<h2>Pages</h2>"));
        assert!(html.as_str().contains("<h2>Posts</h2>"));
    }
}
