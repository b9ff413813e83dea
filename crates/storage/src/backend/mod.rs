//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait, which provides the small
//! set of file operations the site generator needs against its output tree.
//! Every operation is synchronous: a build runs once, start to finish, on a
//! single thread.

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use std::path::Path;

/// Unified interface for output storage.
///
/// # Path Handling
/// All paths are relative to the storage root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations should
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use feedsite_storage::{backend::StorageBackend, error::Result};
///
/// fn unchanged(backend: &dyn StorageBackend, path: &Path, bytes: &[u8]) -> Result<bool> {
///     if !backend.exists(path)? {
///         return Ok(false);
///     }
///     Ok(backend.read(path)? == bytes)
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend. Used for logging only.
    fn name(&self) -> &str;

    /// Check if a file exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write file contents.
    ///
    /// Creates a new file or overwrites an existing file with the provided data.
    ///
    /// # Notes
    /// - Implementations must create parent directories as needed.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}
