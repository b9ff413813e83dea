//! Site Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Storage failures are kept as child
//! frames, so the underlying cause (permission denied, disk full) stays
//! inspectable from the error tree.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A site generation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for site generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a site generation failure.
///
/// ### Per-entry Errors
/// - [`ErrorKind::Render`]
/// - [`ErrorKind::Read`]
/// - [`ErrorKind::Write`]
///
/// ### Build Errors
/// - [`ErrorKind::Template`]
/// - [`ErrorKind::Config`]
/// - [`ErrorKind::Storage`]
/// - [`ErrorKind::Index`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A built-in template is missing or failed to compile.
    #[display("built-in template unavailable: {_0}")]
    Template(#[error(not(source))] String),
    /// A template failed to render for the given document.
    #[display("could not render {_0}")]
    Render(#[error(not(source))] String),
    /// The existing output file could not be read for fingerprinting.
    #[display("could not read existing output: {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The rendered output could not be written.
    #[display("could not write output: {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
    /// The site configuration failed validation.
    #[display("invalid site configuration")]
    Config,
    /// The output tree could not be opened.
    #[display("could not open output storage")]
    Storage,
    /// The table of contents could not be rendered or written.
    #[display("could not write index: {}", _0.display())]
    Index(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Write(_) | Self::Index(_))
    }
}
