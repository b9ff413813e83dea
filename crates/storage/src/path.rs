//! Path validation for the output tree.
//!
//! Every path handed to a storage backend is relative to the output root.
//! Generated slugs are already filesystem-safe, but category folder names and
//! the index filename come from user configuration, so everything is checked
//! here before it touches the disk.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a relative output path and returns its normalized form.
///
/// Ensures that paths don't escape the output root (no `..` traversal), and
/// rejects paths that normalize to nothing. Null bytes are explicitly rejected.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use feedsite_storage::validate_path;
/// // Valid paths
/// assert!(validate_path("posts/2024/03/hello-world.html").is_ok());
/// assert!(validate_path("pages/../index.html").is_ok()); // (never leaves output root)
/// // Invalid paths
/// assert!(validate_path("../index.html").is_err());
/// assert!(validate_path("posts/../../b.html").is_err());
/// assert!(validate_path("a\0b").is_err());
/// // Paths get resolved
/// assert_eq!(
///     validate_path("posts/./2024//03/hello.html/").unwrap(),
///     Path::new("posts/2024/03/hello.html")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let mut components = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}
