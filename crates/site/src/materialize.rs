//! Incremental writes of rendered documents.
//!
//! Every document is rendered in full, then compared against whatever is
//! already stored at its path by BLAKE3 [`Fingerprint`]. Matching content is
//! left untouched (timestamps included), so re-running a build over the same
//! input performs no writes at all.

use crate::error::{ErrorKind, Result};
use crate::path::SitePath;
use crate::render::{RenderedPage, Renderer};
use exn::ResultExt;
use feedsite_entry::Entry;
use feedsite_storage::BackendHandle;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// Content fingerprint of a rendered or stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(blake3::Hash);
impl Fingerprint {
    pub fn of(bytes: impl AsRef<[u8]>) -> Self {
        Self(blake3::hash(bytes.as_ref()))
    }
}
impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.to_hex())
    }
}

impl RenderedPage {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.as_bytes())
    }
}

/// What happened at an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The path was missing or held different content, and was (re)written.
    Written,
    /// The stored content already matched; nothing was written.
    Skipped,
}
impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Skipped => "skipped",
        }
    }
}
impl Display for WriteOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Renders entries and stores them only when their content has changed.
pub struct Materializer {
    backend: BackendHandle,
    renderer: Renderer,
}
impl Materializer {
    pub fn new(backend: BackendHandle, renderer: Renderer) -> Self {
        Self { backend, renderer }
    }

    pub fn backend(&self) -> &BackendHandle {
        &self.backend
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Renders `entry` and makes sure `path` holds exactly that document.
    #[instrument(level = "debug", skip(self, entry), fields(title = %entry.title))]
    pub fn materialize(&self, entry: &Entry, path: &SitePath) -> Result<WriteOutcome> {
        let page = self.renderer.render_entry(entry)?;
        self.store(path, &page)
    }

    /// Writes `page` to `path` unless the stored bytes already fingerprint
    /// identically.
    ///
    /// A stored file that cannot be read is an error rather than a reason to
    /// overwrite it blindly.
    pub fn store(&self, path: &SitePath, page: &RenderedPage) -> Result<WriteOutcome> {
        let location = path.as_path();
        let exists = self.backend.exists(location).or_raise(|| ErrorKind::Read(location.to_path_buf()))?;
        if exists {
            let stored = self.backend.read(location).or_raise(|| ErrorKind::Read(location.to_path_buf()))?;
            let fingerprint = page.fingerprint();
            if Fingerprint::of(&stored) == fingerprint {
                debug!(target = self.backend.name(), %path, %fingerprint, "Output unchanged; skipping write");
                return Ok(WriteOutcome::Skipped);
            }
        }
        self.backend.write(location, page.as_bytes()).or_raise(|| ErrorKind::Write(location.to_path_buf()))?;
        debug!(target = self.backend.name(), %path, replaced = exists, "Output written");
        Ok(WriteOutcome::Written)
    }
}
