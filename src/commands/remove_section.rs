//! Command: remove a section.
use anyhow::Result;

use crate::cli::{GlobalOpts, SectionOpts};
use crate::logging::Logger;

/// Remove `section` with all its lines.  An absent section is reported, not
/// an error.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written.
pub fn run(global: &GlobalOpts, opts: &SectionOpts, log: &Logger) -> Result<()> {
    let mut ini = super::open(&opts.file, global, log)?;
    let changed = ini.remove_section(opts.section.as_str())?;
    super::report(
        log,
        changed,
        &format!("removed [{}]", opts.section),
        &format!("[{}] not found", opts.section),
    );
    Ok(())
}
