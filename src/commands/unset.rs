//! Command: remove a key.
use anyhow::Result;

use crate::cli::{GlobalOpts, KeyOpts};
use crate::logging::Logger;

/// Remove `key` from `section`.  An absent key is reported, not an error.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written.
pub fn run(global: &GlobalOpts, opts: &KeyOpts, log: &Logger) -> Result<()> {
    let mut ini = super::open(&opts.file, global, log)?;
    let changed = ini.remove_value(opts.section.as_str(), opts.key.as_str())?;
    super::report(
        log,
        changed,
        &format!("removed [{}] {}", opts.section, opts.key),
        &format!("[{}] {} not found", opts.section, opts.key),
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::test_support::{CONTENT, LOG, fixture, global, read};

    fn opts(file: std::path::PathBuf, section: &str, key: &str) -> KeyOpts {
        KeyOpts {
            file,
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn removes_key_and_rewrites() {
        let (_dir, file) = fixture(CONTENT);
        run(&global(), &opts(file.clone(), "server", "host"), &LOG).unwrap();
        let text = read(&file);
        assert!(!text.contains("host"));
        assert!(text.contains("port = 8080"));
    }

    #[test]
    fn absent_key_is_not_an_error() {
        let (_dir, file) = fixture(CONTENT);
        run(&global(), &opts(file.clone(), "server", "tls"), &LOG).unwrap();
        assert_eq!(read(&file), CONTENT);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("none.ini");
        assert!(run(&global(), &opts(file, "s", "k"), &LOG).is_err());
    }
}
