//! The [`Ini`] facade: a [`Document`] bound to a file with auto-save.
//!
//! `Ini` owns a document, an injected [`Storage`] and the path the document
//! was last loaded from or saved to.  Mutators report whether anything
//! changed; a change triggers a full rewrite of the bound file under
//! [`AutoSave::OnChange`].  Editing through [`Ini::document_mut`] never
//! performs I/O.
//!
//! # Examples
//!
//! ```no_run
//! use inifmt::Ini;
//!
//! # fn main() -> Result<(), inifmt::IniError> {
//! let mut ini: Ini = Ini::new();
//! ini.load("app.ini")?;
//! if ini.get_value("server", "port").is_none() {
//!     ini.set_value("server", "port", "8080", "default port")?;
//! }
//! # Ok(())
//! # }
//! ```
use std::borrow::Borrow;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::IniError;
use crate::options::{AutoSave, Options};
use crate::storage::{FsStorage, Storage};
use crate::text::IniText;

/// A document bound to a file through a [`Storage`] collaborator.
#[derive(Debug)]
pub struct Ini<T: IniText = String, S: Storage = FsStorage> {
    document: Document<T>,
    storage: S,
    options: Options,
    path: Option<PathBuf>,
}

impl<T: IniText> Ini<T, FsStorage> {
    /// Create an empty, unbound facade over the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(FsStorage)
    }

    /// Wrap an existing document.  Nothing is saved until a path is bound.
    #[must_use]
    pub fn from_document(document: Document<T>) -> Self {
        Self {
            document,
            ..Self::new()
        }
    }
}

impl<T: IniText> Default for Ini<T, FsStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IniText, S: Storage> Ini<T, S> {
    /// Create an empty, unbound facade over `storage`.
    pub fn with_storage(storage: S) -> Self {
        Self {
            document: Document::new(),
            storage,
            options: Options::default(),
            path: None,
        }
    }

    /// Replace the facade options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Set the auto-save target without loading it.
    pub fn bind(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Path auto-save writes to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the document with the contents of `path` and bind to it.
    ///
    /// On failure neither the document nor the bound path change.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be read,
    /// [`IniError::Decode`] if its bytes are not valid text, or
    /// [`IniError::Syntax`] if the text does not parse.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), IniError> {
        let path = path.as_ref();
        let bytes = self.storage.read(path).map_err(|source| IniError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = T::decode(&bytes).map_err(|source| IniError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let document =
            Document::parse_with(text.as_units(), self.options.quoting).map_err(|source| {
                IniError::Syntax {
                    file: path.display().to_string(),
                    source,
                }
            })?;
        tracing::debug!(
            path = %path.display(),
            sections = document.len(),
            "loaded document"
        );
        self.document = document;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Write the document to `path` and bind to it.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be written.  The bound
    /// path is left unchanged in that case.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), IniError> {
        let path = path.as_ref();
        self.write(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the document by parsing in-memory `text`.
    ///
    /// The bound path is kept, but nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Parse`] if the text does not parse; the current
    /// document is kept.
    pub fn parse(&mut self, text: &(impl AsRef<[T::Unit]> + ?Sized)) -> Result<(), IniError> {
        self.document = Document::parse_with(text, self.options.quoting)?;
        Ok(())
    }

    /// Serialize the document with the configured quoting.
    #[must_use]
    pub fn dump(&self) -> T {
        self.document.dump_with(self.options.quoting)
    }

    /// The underlying document.
    pub const fn document(&self) -> &Document<T> {
        &self.document
    }

    /// Mutable access to the document.  Changes made here are not auto-saved.
    pub const fn document_mut(&mut self) -> &mut Document<T> {
        &mut self.document
    }

    /// Unwrap the document, dropping the binding.
    pub fn into_document(self) -> Document<T> {
        self.document
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Returns `true` if section `name` exists.
    pub fn has_section<Q>(&self, name: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document.has_section(name)
    }

    /// Section names in order.
    pub fn enum_sections(&self) -> Vec<&T> {
        self.document.section_names()
    }

    /// Returns `true` if `section` holds `key`.
    pub fn has_key<Q>(&self, section: &Q, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document.has_key(section, key)
    }

    /// Keys of `section` in order.
    pub fn enum_keys<Q>(&self, section: &Q) -> Vec<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document.keys(section)
    }

    /// `(key, value)` pairs of `section` in order.
    pub fn enum_key_values<Q>(&self, section: &Q) -> Vec<(&T, &T)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document.key_values(section)
    }

    /// Value of `key` in `section`, or `None` if either is absent.
    pub fn get_value<Q>(&self, section: &Q, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document.get_value(section, key)
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Create section `name` or update its comment.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if auto-save fails; the change is kept in
    /// memory.
    pub fn add_section(
        &mut self,
        name: impl Into<T>,
        comment: impl Into<T>,
    ) -> Result<bool, IniError> {
        let changed = self.document.add_section(name, comment);
        self.commit(changed)
    }

    /// Remove section `name`.  `Ok(false)` means it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if auto-save fails; the change is kept in
    /// memory.
    pub fn remove_section<Q>(&mut self, name: &Q) -> Result<bool, IniError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let changed = self.document.remove_section(name);
        self.commit(changed)
    }

    /// Set `key` in `section`, creating the section if needed.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if auto-save fails; the change is kept in
    /// memory.
    pub fn set_value(
        &mut self,
        section: impl Into<T>,
        key: impl Into<T>,
        value: impl Into<T>,
        comment: impl Into<T>,
    ) -> Result<bool, IniError> {
        let changed = self.document.set_value(section, key, value, comment);
        self.commit(changed)
    }

    /// Remove `key` from `section`.  `Ok(false)` means it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if auto-save fails; the change is kept in
    /// memory.
    pub fn remove_value<Q>(&mut self, section: &Q, key: &Q) -> Result<bool, IniError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let changed = self.document.remove_value(section, key);
        self.commit(changed)
    }

    /// Auto-save after a mutation, passing its change flag through.
    fn commit(&self, changed: bool) -> Result<bool, IniError> {
        if !changed || self.options.autosave == AutoSave::Never {
            return Ok(changed);
        }
        if let Some(path) = self.path.as_deref() {
            tracing::debug!(path = %path.display(), "auto-saving document");
            self.write(path)?;
        }
        Ok(changed)
    }

    fn write(&self, path: &Path) -> Result<(), IniError> {
        let bytes = self.dump().encode();
        self.storage
            .write(path, &bytes)
            .map_err(|source| IniError::Io {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            sections = self.document.len(),
            bytes = bytes.len(),
            "saved document"
        );
        Ok(())
    }
}
