//! File access abstraction for dependency injection.
//!
//! Provides the [`Storage`] trait so that the [`Ini`](crate::Ini) facade can
//! be unit-tested without touching the real filesystem.  Production code uses
//! [`FsStorage`]; tests use [`MemoryStorage`] or the generated
//! `MockStorage`.
//!
//! Storage moves raw bytes only.  Decoding and encoding of document text is
//! handled by [`IniText`](crate::IniText).

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Byte-level whole-file access used by the facade.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Read the entire file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the entire file at `path` with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Production [`Storage`] implementation backed by [`std::fs`].
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so readers never observe a half-written file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory [`Storage`] for tests and embedding.
///
/// Pre-seed files with [`with_file`](Self::with_file); inspect writes with
/// [`contents`](Self::contents).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `path` with `bytes`.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), bytes.into());
        self
    }

    /// Current bytes stored at `path`, if any.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .cloned()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.contents(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).write(path, bytes)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // FsStorage
    // -----------------------------------------------------------------------

    #[test]
    fn fs_storage_write_then_read() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("app.ini");
        FsStorage.write(&path, b"[s]\r\n").expect("write");
        assert_eq!(FsStorage.read(&path).expect("read"), b"[s]\r\n");
    }

    #[test]
    fn fs_storage_write_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("app.ini");
        std::fs::write(&path, "old contents that are longer").expect("seed");
        FsStorage.write(&path, b"new").expect("write");
        assert_eq!(std::fs::read(&path).expect("read"), b"new");
        let leftovers = std::fs::read_dir(dir.path()).expect("list").count();
        assert_eq!(leftovers, 1, "temporary file must be renamed away");
    }

    #[test]
    fn fs_storage_read_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = FsStorage
            .read(&dir.path().join("missing.ini"))
            .expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn fs_storage_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("no").join("such").join("app.ini");
        assert!(FsStorage.write(&path, b"x").is_err());
    }

    // -----------------------------------------------------------------------
    // MemoryStorage
    // -----------------------------------------------------------------------

    #[test]
    fn memory_storage_seed_and_overwrite() {
        let storage = MemoryStorage::new().with_file("a.ini", "k=v");
        assert_eq!(storage.read(Path::new("a.ini")).unwrap(), b"k=v");
        storage.write(Path::new("a.ini"), b"k=w").unwrap();
        assert_eq!(storage.contents("a.ini").unwrap(), b"k=w");
    }

    #[test]
    fn memory_storage_missing_is_not_found() {
        let err = MemoryStorage::new()
            .read(Path::new("nope.ini"))
            .expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn storage_by_reference_delegates() {
        let storage = MemoryStorage::new();
        let borrowed = &storage;
        borrowed.write(Path::new("b.ini"), b"x").unwrap();
        assert_eq!(storage.contents("b.ini").unwrap(), b"x");
    }

    #[test]
    fn mock_storage_reports_configured_failure() {
        let mut mock = MockStorage::new();
        mock.expect_write()
            .returning(|_, _| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        let err = mock.write(Path::new("x.ini"), b"").expect_err("mocked failure");
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
