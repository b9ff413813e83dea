//! Local filesystem storage backend.
//!
//! Files are stored under a configured output directory and accessed using
//! standard filesystem operations.

use crate::error::ErrorKind;
use crate::{StorageBackend, error::Result, path::validate as validate_path};
use std::fs;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend.
///
/// Stores files in a directory on the local filesystem. All paths are relative
/// to the configured root directory.
///
/// # Examples
///
/// ```no_run
/// use feedsite_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("site", "/var/www/site")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Root directory of the output tree
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend, creating the root directory if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPath`] if the path is not absolute or
    /// points at something other than a directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| Self::map_io_error(e, &root))?;
            tracing::debug!(root = %root.display(), "Created output directory");
        }
        Ok(Self { name: name.into(), root })
    }

    /// Root directory of the output tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative storage path.
    ///
    /// Validates the path and joins it with the root directory.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::exists(&abs_path).map_err(|e| Self::map_io_error(e, path))?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).map_err(|e| Self::map_io_error(e, path))?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_io_error(e, path))?;
        }
        Ok(fs::write(&abs_path, data).map_err(|e| Self::map_io_error(e, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> (tempfile::TempDir, LocalBackend) {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("site", temp_dir.path()).unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_new_requires_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new("site", temp_dir.path()).is_ok());
        assert!(LocalBackend::new("site", "relative/path").is_err());
        assert!(LocalBackend::new("site", "./relative").is_err());
    }

    #[test]
    fn test_new_creates_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("public/site");
        let backend = LocalBackend::new("site", &root).unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.root(), root);
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("index.html");
        fs::write(&file, b"<html></html>").unwrap();
        let err = LocalBackend::new("site", &file).err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_absolute_path() {
        let (temp_dir, backend) = backend();
        let expected = temp_dir.path().join("posts/2024/03/hello.html");
        assert_eq!(backend.absolute_path(Path::new("posts/2024/03/hello.html")).unwrap(), expected);
        assert!(backend.absolute_path(Path::new("../etc/passwd")).is_err());
    }

    #[test]
    fn test_write_and_read() {
        let (_temp_dir, backend) = backend();
        let data = b"<p>hi</p>";
        backend.write(Path::new("index.html"), data).unwrap();
        assert_eq!(backend.read(Path::new("index.html")).unwrap(), data);
    }

    #[test]
    fn test_write_creates_directories() {
        let (temp_dir, backend) = backend();
        backend.write(Path::new("posts/2024/03/hello.html"), b"data").unwrap();
        assert!(backend.exists(Path::new("posts/2024/03/hello.html")).unwrap());
        assert!(temp_dir.path().join("posts/2024/03").is_dir());
    }

    #[test]
    fn test_write_overwrites() {
        let (_temp_dir, backend) = backend();
        backend.write(Path::new("pages/about.html"), b"old").unwrap();
        backend.write(Path::new("pages/about.html"), b"new").unwrap();
        assert_eq!(backend.read(Path::new("pages/about.html")).unwrap(), b"new");
    }

    #[test]
    fn test_exists() {
        let (_temp_dir, backend) = backend();
        assert!(!backend.exists(Path::new("nonexistent.html")).unwrap());
        backend.write(Path::new("exists.html"), b"data").unwrap();
        assert!(backend.exists(Path::new("exists.html")).unwrap());
    }

    #[test]
    fn test_read_missing_file() {
        let (_temp_dir, backend) = backend();
        let err = backend.read(Path::new("pages/missing.html")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_path_security() {
        let (_temp_dir, backend) = backend();
        assert!(backend.read(Path::new("../etc/passwd")).is_err());
        assert!(backend.read(Path::new("posts/../../passwd")).is_err());
        assert!(backend.write(Path::new("../index.html"), b"data").is_err());
        assert!(backend.exists(Path::new("../../file")).is_err());
    }
}
