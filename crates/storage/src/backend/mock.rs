//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    writes: usize,
}

/// In-memory storage backend for testing.
///
/// Files are stored in a map behind a [`Mutex`], so all trait methods can
/// operate on `&self`. Individual paths can be configured to fail on write,
/// which is how partial-failure handling gets exercised without fiddling
/// with filesystem permissions.
///
/// # Examples
///
/// ```
/// use feedsite_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// let backend = MockBackend::with_files([("pages/about.html", b"<h1>About</h1>")]);
/// assert!(backend.exists(Path::new("pages/about.html")).unwrap());
///
/// backend.write(Path::new("index.html"), b"<ul></ul>").unwrap();
/// assert_eq!(backend.write_count(), 1);
/// ```
pub struct MockBackend {
    name: String,
    state: Mutex<State>,
    failing: HashSet<PathBuf>,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass. Pre-populated files do not
    /// count towards [`write_count`](Self::write_count).
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = BTreeMap::new();
        for (path, data) in files {
            let path = path.into();
            let Ok(validated) = validate_path(&path) else {
                panic!("MockBackend::with_files: invalid path {}", path.display());
            };
            map.insert(validated, data.into());
        }
        Self {
            name: "mock".to_string(),
            state: Mutex::new(State { files: map, writes: 0 }),
            failing: HashSet::new(),
        }
    }

    /// Make every write to `path` fail with [`ErrorKind::PermissionDenied`].
    pub fn failing_on(mut self, path: impl AsRef<Path>) -> Self {
        let Ok(validated) = validate_path(path.as_ref()) else {
            panic!("MockBackend::failing_on: invalid path {}", path.as_ref().display());
        };
        self.failing.insert(validated);
        self
    }

    /// Number of successful writes performed through the trait.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Snapshot of every stored path, in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only happens after a panicking test; the data is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.lock().files.contains_key(&path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        self.lock().files.get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        if self.failing.contains(&path) {
            exn::bail!(ErrorKind::PermissionDenied(path));
        }
        let mut state = self.lock();
        state.files.insert(path, data.to_vec());
        state.writes += 1;
        Ok(())
    }
}
