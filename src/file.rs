//! One-shot helpers: load a UTF-8 file, run a single query or edit, save.
//!
//! Mutators write only when something changed and treat a missing file as an
//! empty document, creating it on the first real change.
//!
//! ```no_run
//! # fn main() -> Result<(), inifmt::IniError> {
//! inifmt::file::set_value("app.ini", "server", "port", "8080", "")?;
//! assert_eq!(
//!     inifmt::file::get_value("app.ini", "server", "port")?.as_deref(),
//!     Some("8080")
//! );
//! # Ok(())
//! # }
//! ```
use std::path::Path;

use crate::error::IniError;
use crate::ini::Ini;

fn open(path: &Path) -> Result<Ini, IniError> {
    let mut ini = Ini::new();
    ini.load(path)?;
    Ok(ini)
}

fn open_or_create(path: &Path) -> Result<Ini, IniError> {
    match open(path) {
        Err(e) if e.is_not_found() => {
            let mut ini = Ini::new();
            ini.bind(path);
            Ok(ini)
        }
        other => other,
    }
}

/// Section names of the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn sections(path: impl AsRef<Path>) -> Result<Vec<String>, IniError> {
    let ini = open(path.as_ref())?;
    Ok(ini.enum_sections().into_iter().cloned().collect())
}

/// Returns `true` if `section` exists in the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn has_section(path: impl AsRef<Path>, section: &str) -> Result<bool, IniError> {
    Ok(open(path.as_ref())?.has_section(section))
}

/// Create `section` or update its comment.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written.
pub fn add_section(
    path: impl AsRef<Path>,
    section: &str,
    comment: &str,
) -> Result<bool, IniError> {
    open_or_create(path.as_ref())?.add_section(section, comment)
}

/// Remove `section` and its lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written.
pub fn remove_section(path: impl AsRef<Path>, section: &str) -> Result<bool, IniError> {
    open_or_create(path.as_ref())?.remove_section(section)
}

/// Keys of `section` in order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn keys(path: impl AsRef<Path>, section: &str) -> Result<Vec<String>, IniError> {
    let ini = open(path.as_ref())?;
    Ok(ini.enum_keys(section).into_iter().cloned().collect())
}

/// `(key, value)` pairs of `section` in order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn key_values(
    path: impl AsRef<Path>,
    section: &str,
) -> Result<Vec<(String, String)>, IniError> {
    let ini = open(path.as_ref())?;
    Ok(ini
        .enum_key_values(section)
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect())
}

/// Returns `true` if `section` holds `key`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn has_key(path: impl AsRef<Path>, section: &str, key: &str) -> Result<bool, IniError> {
    Ok(open(path.as_ref())?.has_key(section, key))
}

/// Value of `key` in `section`, or `None` if either is absent.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn get_value(
    path: impl AsRef<Path>,
    section: &str,
    key: &str,
) -> Result<Option<String>, IniError> {
    Ok(open(path.as_ref())?.get_value(section, key).cloned())
}

/// Set `key` in `section`, creating either as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written.
pub fn set_value(
    path: impl AsRef<Path>,
    section: &str,
    key: &str,
    value: &str,
    comment: &str,
) -> Result<bool, IniError> {
    open_or_create(path.as_ref())?.set_value(section, key, value, comment)
}

/// Remove `key` from `section`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written.
pub fn remove_value(path: impl AsRef<Path>, section: &str, key: &str) -> Result<bool, IniError> {
    open_or_create(path.as_ref())?.remove_value(section, key)
}
