//! Command: list section names.
use std::io::Write;

use anyhow::Result;

use crate::cli::{FileOpts, GlobalOpts};
use crate::logging::Logger;

/// Print one section name per line.  The global section prints as an empty
/// line.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or output cannot be written.
pub fn run(global: &GlobalOpts, opts: &FileOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let ini = super::open(&opts.file, global, log)?;
    for name in ini.enum_sections() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
