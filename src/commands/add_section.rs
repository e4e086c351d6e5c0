//! Command: add a section or update its comment.
use anyhow::Result;

use crate::cli::{AddSectionOpts, GlobalOpts};
use crate::logging::Logger;

/// Create `section`, or replace its header comment if it exists.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written.
pub fn run(global: &GlobalOpts, opts: &AddSectionOpts, log: &Logger) -> Result<()> {
    let mut ini = super::open_or_create(&opts.file, global, log)?;
    let changed = ini.add_section(opts.section.as_str(), opts.comment.as_str())?;
    super::report(
        log,
        changed,
        &format!("added [{}]", opts.section),
        &format!("[{}] already exists", opts.section),
    );
    Ok(())
}
