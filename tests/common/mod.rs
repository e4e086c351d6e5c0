// Shared helpers for integration tests.
//
// Provides a temporary directory holding INI files so each integration test
// can work against real paths without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Irregularly spaced input exercising the global section, a repeated
/// header, quoted values and comment alignment.
pub const MESSY: &str = include_str!("../fixtures/messy.ini");

/// An isolated directory of INI files backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IniTestContext {
    /// Temporary directory holding the test files.
    pub root: tempfile::TempDir,
}

impl IniTestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `contents` to `name` inside the context, returning its path.
    pub fn with_file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Path of `name` inside the context (the file need not exist).
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Read `path` as UTF-8 text.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("read file")
    }

    /// Read `path` as raw bytes.
    pub fn read_bytes(&self, path: &Path) -> Vec<u8> {
        std::fs::read(path).expect("read file")
    }
}

/// Replace CRLF with LF so text snapshots read naturally.
pub fn unix_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}
