//! Output path resolution.
//!
//! Converts classified [`Entry`] records into unique relative paths inside
//! the output tree:
//!
//! | Classification | Date    | Path                                   |
//! |----------------|---------|----------------------------------------|
//! | Post           | present | `{posts}/{year}/{month:02}/{slug}.html` |
//! | Post           | absent  | `{posts}/{slug}.html`                   |
//! | Page           | any     | `{pages}/{slug}.html`                   |
//!
//! Uniqueness is tracked by a [`PathRegistry`] that lives for exactly one
//! build. When a path is already taken, `-2`, `-3`, ... is appended to the
//! slug until a free path is found, so the outcome depends only on the order
//! entries are resolved in.

use crate::slug::{link_slug, slugify};
use feedsite_config::{SiteConfig, SlugSource};
use feedsite_entry::{Classification, Entry};
use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

/// A relative, `/`-separated output path ending in `.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SitePath(String);
impl SitePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}
impl AsRef<Path> for SitePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
impl Display for SitePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
impl From<SitePath> for String {
    fn from(path: SitePath) -> Self {
        path.0
    }
}

/// The set of paths assigned so far in the current build.
#[derive(Debug, Default)]
pub struct PathRegistry {
    assigned: HashSet<SitePath>,
}
impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the path for `entry` and claims it.
    ///
    /// Never fails: a collision is resolved by suffixing the slug, and a title
    /// with nothing sluggable in it becomes `untitled`.
    pub fn resolve(&mut self, entry: &Entry, classification: Classification, config: &SiteConfig) -> SitePath {
        let directory = Self::directory(entry, classification, config);
        let slug = Self::slug(entry, config.slug_source);
        let mut candidate = SitePath(format!("{directory}/{slug}.html"));
        let mut suffix = 2_usize;
        while self.assigned.contains(&candidate) {
            candidate = SitePath(format!("{directory}/{slug}-{suffix}.html"));
            suffix += 1;
        }
        if suffix > 2 {
            tracing::debug!(title = %entry.title, path = %candidate, "Path collision resolved with numeric suffix");
        }
        self.assigned.insert(candidate.clone());
        candidate
    }

    pub fn contains(&self, path: &SitePath) -> bool {
        self.assigned.contains(path)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Category root plus the `YYYY/MM` segment for dated posts.
    fn directory(entry: &Entry, classification: Classification, config: &SiteConfig) -> String {
        let root = |dir: &str| dir.trim_matches('/').to_string();
        match (classification, entry.published_at) {
            (Classification::Page, _) => root(&config.pages_dir),
            (Classification::Post, Some(at)) => {
                format!("{}/{:04}/{:02}", root(&config.posts_dir), at.year(), u8::from(at.month()))
            },
            (Classification::Post, None) => root(&config.posts_dir),
        }
    }

    fn slug(entry: &Entry, source: SlugSource) -> String {
        match source {
            SlugSource::Title => slugify(&entry.title),
            SlugSource::Link => link_slug(&entry.source_link).unwrap_or_else(|| slugify(&entry.title)),
        }
    }
}
