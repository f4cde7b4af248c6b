//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use labra_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{LabraError, LabraResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the service under test borrows another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,
    writes: Vec<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its parent directories) without recording a write.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Make every later write to `path` fail with "permission denied".
    pub fn deny_writes(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Every path passed to `write_file`, in call order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.writes.clone())
            .unwrap_or_default()
    }

    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn lock_poisoned() -> LabraError {
    LabraError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> LabraResult<String> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::filesystem(path, "read file", "No such file or directory").into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> LabraResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.read_only.contains(path) {
            return Err(ApplicationError::filesystem(path, "write file", "Permission denied").into());
        }
        if let Some(parent) = path.parent() {
            insert_ancestors(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_owned());
        inner.writes.push(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> LabraResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }
}
