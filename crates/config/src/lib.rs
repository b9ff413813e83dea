//! Site configuration.
//!
//! The generator itself only ever sees a [`SiteConfig`] value; how that value
//! is assembled is up to the caller. [`SiteConfig::load`] is the batteries
//! included route: defaults, then a TOML/YAML/JSON file, then `FEEDSITE_*`
//! environment variables, each layer overriding the last.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use feedsite_entry::ClassifierRules;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use feedsite_storage::validate_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix for environment variable overrides (`FEEDSITE_POSTS_DIR`, ...).
pub const ENV_PREFIX: &str = "FEEDSITE_";

/// Where slugs are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugSource {
    /// Slug the entry title.
    #[default]
    Title,
    /// Slug the last path segment of the entry's source link, falling back
    /// to the title when the link has none.
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Root of the generated output tree
    pub output: PathBuf,
    /// Category folder for blog posts
    pub posts_dir: String,
    /// Category folder for standalone pages
    pub pages_dir: String,
    /// Filename of the table of contents, placed at the output root
    pub index_file: String,
    /// Heading and `<title>` of the table of contents
    pub index_title: String,
    /// Tag terms (case-insensitive) that mark an entry as a page
    pub page_markers: Vec<String>,
    pub slug_source: SlugSource,
}
impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("site"),
            posts_dir: "posts".to_string(),
            pages_dir: "pages".to_string(),
            index_file: "index.html".to_string(),
            index_title: "Contents".to_string(),
            page_markers: ClassifierRules::default().page_markers().to_vec(),
            slug_source: SlugSource::Title,
        }
    }
}
impl SiteConfig {
    /// Layers defaults, the given file, and `FEEDSITE_*` environment
    /// variables, then [validates](Self::validate) the result.
    ///
    /// The file format is chosen from the extension (`.toml`, `.yaml`/`.yml`
    /// or `.json`). A missing file is not an error; figment skips it.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::Invalid(format!("unsupported config format: {}", path.display()))),
        };
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)), path.display().to_string())
    }

    /// Defaults overridden by `FEEDSITE_*` environment variables only.
    pub fn from_env() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment, "environment")
    }

    fn extract(figment: Figment, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let config = figment.extract::<Self>().or_raise(|| ErrorKind::Load(source))?.normalized()?;
        tracing::debug!(output = %config.output.display(), "Loaded site configuration");
        Ok(config)
    }

    /// Checks that the category folders and index filename are usable as
    /// paths relative to the output root and don't step on each other.
    pub fn validate(&self) -> Result<()> {
        let posts = Self::relative("posts_dir", &self.posts_dir)?;
        let pages = Self::relative("pages_dir", &self.pages_dir)?;
        let index = Self::relative("index_file", &self.index_file)?;
        if posts == pages {
            exn::bail!(ErrorKind::Invalid("posts_dir and pages_dir must differ".to_string()));
        }
        if index.components().count() != 1 || !self.index_file.ends_with(".html") {
            exn::bail!(ErrorKind::Invalid(format!(
                "index_file must be a plain .html filename, got {:?}",
                self.index_file
            )));
        }
        if index == posts || index == pages {
            exn::bail!(ErrorKind::Invalid("index_file collides with a category folder".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("output must not be empty".to_string()));
        }
        Ok(())
    }

    /// [Validates](Self::validate) the configuration and rewrites the category
    /// folders and index filename into their canonical `/`-separated form, so
    /// that two spellings of one folder (`a/../b`, `./b/`) become the same
    /// string.
    pub fn normalized(mut self) -> Result<Self> {
        self.validate()?;
        self.posts_dir = Self::canonical("posts_dir", &self.posts_dir)?;
        self.pages_dir = Self::canonical("pages_dir", &self.pages_dir)?;
        self.index_file = Self::canonical("index_file", &self.index_file)?;
        Ok(self)
    }

    fn canonical(field: &'static str, value: &str) -> Result<String> {
        let path = Self::relative(field, value)?;
        let segments: Vec<_> = path.components().map(|c| c.as_os_str().to_string_lossy()).collect();
        Ok(segments.join("/"))
    }

    fn relative(field: &'static str, value: &str) -> Result<PathBuf> {
        validate_path(value).or_raise(|| ErrorKind::Invalid(format!("{field} is not a usable relative path: {value:?}")))
    }
}
