//! Command: set a value.
use anyhow::Result;

use crate::cli::{GlobalOpts, SetOpts};
use crate::logging::Logger;

/// Set `key` in `section`, creating the file and section as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written.
pub fn run(global: &GlobalOpts, opts: &SetOpts, log: &Logger) -> Result<()> {
    let mut ini = super::open_or_create(&opts.file, global, log)?;
    let changed = ini.set_value(
        opts.section.as_str(),
        opts.key.as_str(),
        opts.value.as_str(),
        opts.comment.as_str(),
    )?;
    super::report(
        log,
        changed,
        &format!("set [{}] {}", opts.section, opts.key),
        &format!("[{}] {} already has that value", opts.section, opts.key),
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::test_support::{CONTENT, LOG, fixture, global, read};

    fn opts(file: std::path::PathBuf, section: &str, key: &str, value: &str) -> SetOpts {
        SetOpts {
            file,
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn overwrites_in_place() {
        let (_dir, file) = fixture(CONTENT);
        run(&global(), &opts(file.clone(), "server", "host", "0.0.0.0"), &LOG).unwrap();
        assert!(read(&file).starts_with("[server] ;listener\r\nhost = 0.0.0.0\r\nport = 8080\r\n"));
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("fresh.ini");
        let mut set = opts(file.clone(), "s", "k", " padded ");
        set.comment = "note".to_string();
        run(&global(), &set, &LOG).unwrap();
        assert_eq!(read(&file), "[s]\r\nk = \" padded \" ;note\r\n\r\n");
    }

    #[test]
    fn unchanged_value_leaves_file_alone() {
        let (_dir, file) = fixture("[s]\nk=v\n");
        run(&global(), &opts(file.clone(), "s", "k", "v"), &LOG).unwrap();
        assert_eq!(read(&file), "[s]\nk=v\n");
    }
}
