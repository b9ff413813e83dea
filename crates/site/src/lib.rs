//! Static site generation from normalized feed entries.
//!
//! Turns a sequence of [`RawEntry`](feedsite_entry::RawEntry) values into a
//! tree of standalone HTML documents plus one table-of-contents index:
//!
//! ```text
//! {output}/
//! ├── index.html
//! ├── pages/{slug}.html
//! └── posts/{year}/{month}/{slug}.html
//! ```
//!
//! Documents whose rendered bytes already match what is on disk are never
//! rewritten, so repeated builds over an unchanged feed touch nothing but
//! the index. See [`Site`] for the entry point.

mod build;
pub mod error;
mod index;
mod materialize;
mod path;
mod render;
mod slug;

pub use crate::build::{BuildReport, Failure, PageReport, Site};
pub use crate::index::{IndexRecord, build_index, sections};
pub use crate::materialize::{Fingerprint, Materializer, WriteOutcome};
pub use crate::path::{PathRegistry, SitePath};
pub use crate::render::{RenderedPage, Renderer};
pub use crate::slug::{UNTITLED_SLUG, link_slug, slugify};
