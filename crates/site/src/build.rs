//! The build driver.
//!
//! A [`Site`] owns one output tree. Each call to [`Site::build`] is a full,
//! sequential run over the given entries in feed order:
//!
//! ```text
//! RawEntry ─► normalize ─► classify ─► PathRegistry::resolve ─► materialize
//!                                                                   │
//!                                          IndexRecord ◄── success ─┘
//! ```
//!
//! A failure to write one entry is recorded in the [`BuildReport`] and the
//! run moves on. The index is written last from the successful entries only,
//! and a failure there fails the whole build.

use crate::error::{Error, ErrorKind, Result};
use crate::index::{IndexRecord, build_index};
use crate::materialize::{Materializer, WriteOutcome};
use crate::path::{PathRegistry, SitePath};
use crate::render::Renderer;
use exn::ResultExt;
use feedsite_config::SiteConfig;
use feedsite_entry::{Classification, ClassifierRules, RawEntry, classify, normalize};
use feedsite_storage::BackendHandle;
use feedsite_storage::backend::LocalBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// An entry that was written (or found unchanged) during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub title: String,
    pub path: SitePath,
    pub classification: Classification,
    pub outcome: WriteOutcome,
}

/// An entry that could not be materialized.
#[derive(Debug)]
pub struct Failure {
    pub title: String,
    pub path: SitePath,
    pub error: Error,
}

/// Everything one build did, in feed order.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: Vec<PageReport>,
    pub failures: Vec<Failure>,
    /// Location of the index, relative to the output root.
    pub index: PathBuf,
}
impl BuildReport {
    pub fn written(&self) -> usize {
        self.count(WriteOutcome::Written)
    }

    pub fn skipped(&self) -> usize {
        self.count(WriteOutcome::Skipped)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, outcome: WriteOutcome) -> usize {
        self.pages.iter().filter(|page| page.outcome == outcome).count()
    }
}

/// A configured output tree.
pub struct Site {
    config: SiteConfig,
    rules: ClassifierRules,
    materializer: Materializer,
}
impl Site {
    /// Builds into an arbitrary storage backend.
    ///
    /// The configuration is validated and normalized first, so every output
    /// path is derived from canonical folder names.
    pub fn new(config: SiteConfig, backend: BackendHandle) -> Result<Self> {
        let config = config.normalized().or_raise(|| ErrorKind::Config)?;
        let rules = ClassifierRules::new(&config.page_markers);
        let materializer = Materializer::new(backend, Renderer::new()?);
        Ok(Self { config, rules, materializer })
    }

    /// Builds into the local directory named by `config.output`, creating it
    /// when missing.
    pub fn open(config: SiteConfig) -> Result<Self> {
        let root = std::path::absolute(&config.output).or_raise(|| ErrorKind::Storage)?;
        let backend = LocalBackend::new("output", &root).or_raise(|| ErrorKind::Storage)?;
        Self::new(config, Arc::new(backend))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Runs one full build.
    ///
    /// Only an index failure is returned as an error; per-entry failures are
    /// collected in [`BuildReport::failures`].
    #[instrument(skip_all, fields(target = self.materializer.backend().name()))]
    pub fn build<'a>(&self, entries: impl IntoIterator<Item = &'a RawEntry>) -> Result<BuildReport> {
        let mut registry = PathRegistry::new();
        let mut records = Vec::new();
        let mut pages = Vec::new();
        let mut failures = Vec::new();

        for raw in entries {
            let entry = normalize(raw);
            let classification = classify(&entry, &self.rules);
            let path = registry.resolve(&entry, classification, &self.config);
            match self.materializer.materialize(&entry, &path) {
                Ok(outcome) => {
                    records.push(IndexRecord::new(&entry, classification, &path));
                    pages.push(PageReport {
                        title: entry.title,
                        path,
                        classification,
                        outcome,
                    });
                },
                Err(error) => {
                    warn!(title = %entry.title, %path, %error, "Could not materialize entry");
                    failures.push(Failure { title: entry.title, path, error });
                },
            }
        }

        let index = self.write_index(&records)?;
        let report = BuildReport { pages, failures, index };
        info!(
            written = report.written(),
            skipped = report.skipped(),
            failed = report.failures.len(),
            index = %report.index.display(),
            "Build finished",
        );
        Ok(report)
    }

    /// The index is rewritten on every build.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    fn write_index(&self, records: &[IndexRecord]) -> Result<PathBuf> {
        let path = PathBuf::from(&self.config.index_file);
        let index = build_index(records, self.materializer.renderer(), &self.config.index_title)
            .or_raise(|| ErrorKind::Index(path.clone()))?;
        self.materializer
            .backend()
            .write(&path, index.as_bytes())
            .or_raise(|| ErrorKind::Index(path.clone()))?;
        Ok(path)
    }
}
