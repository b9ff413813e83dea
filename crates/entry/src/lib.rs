//! Feed entries, from raw collaborator input to classified [`Entry`] records.
//!
//! Fetching and parsing the feed happens elsewhere; this crate receives
//! [`RawEntry`] values exactly as the feed parser produced them and turns each
//! into an immutable [`Entry`] via [`normalize`], then decides whether it is a
//! blog post or a standalone page via [`classify`]. Neither step can fail:
//! malformed input degrades to defaults.

mod classify;
pub mod models;
mod normalize;

pub use crate::classify::{BLOGGER_PAGE_KIND, ClassifierRules, classify, link_path};
pub use crate::models::{Classification, Entry, RawContent, RawEntry, RawTag};
pub use crate::normalize::{UNTITLED, normalize, parse_timestamp};
