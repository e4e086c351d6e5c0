//! Subcommand implementations.
//!
//! Each handler takes the parsed options, a [`Logger`] for progress on stderr
//! and a writer for the command's output, so handlers can be exercised
//! against an in-memory buffer.

pub mod add_section;
pub mod export;
pub mod fmt;
pub mod get;
pub mod keys;
pub mod remove_section;
pub mod sections;
pub mod set;
pub mod unset;
pub mod version;

use std::path::Path;

use anyhow::{Context as _, Result};
use inifmt::Ini;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Load `file` with the options selected by the global flags.
///
/// # Errors
///
/// Returns an error if the file cannot be read, decoded, or parsed.
pub fn open(file: &Path, global: &GlobalOpts, log: &Logger) -> Result<Ini> {
    let mut ini = Ini::new().with_options(global.options());
    ini.load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    log.debug(&format!(
        "loaded {} section(s) from {}",
        ini.document().len(),
        file.display()
    ));
    Ok(ini)
}

/// Like [`open`], but a missing file yields an empty document bound to
/// `file` so the first change creates it.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read, decoded, or parsed.
pub fn open_or_create(file: &Path, global: &GlobalOpts, log: &Logger) -> Result<Ini> {
    let mut ini = Ini::new().with_options(global.options());
    match ini.load(file) {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            log.debug(&format!("{} does not exist, starting empty", file.display()));
            ini.bind(file);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load {}", file.display()));
        }
    }
    Ok(ini)
}

/// Log the outcome of a mutation.
fn report(log: &Logger, changed: bool, done: &str, unchanged: &str) {
    if changed {
        log.info(done);
    } else {
        log.warn(unchanged);
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_support::{LOG, fixture, global};
    use super::*;

    #[test]
    fn open_reports_missing_file_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ini");
        let err = open(&path, &global(), &LOG).expect_err("missing file");
        assert!(format!("{err:#}").contains("missing.ini"));
    }

    #[test]
    fn open_or_create_binds_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.ini");
        let ini = open_or_create(&path, &global(), &LOG).unwrap();
        assert!(ini.document().is_empty());
        assert_eq!(ini.path(), Some(path.as_path()));
    }

    #[test]
    fn open_or_create_propagates_syntax_errors() {
        let (_dir, path) = fixture("[broken\n");
        let err = open_or_create(&path, &global(), &LOG).expect_err("syntax error");
        assert!(format!("{err:#}").contains("unterminated section header"));
    }
}
