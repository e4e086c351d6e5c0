//! Command: list the keys of a section.
use std::io::Write;

use anyhow::{Result, bail};

use crate::cli::{GlobalOpts, SectionOpts};
use crate::logging::Logger;

/// Print one key per line.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the section is absent.
pub fn run(
    global: &GlobalOpts,
    opts: &SectionOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let ini = super::open(&opts.file, global, log)?;
    if !ini.has_section(opts.section.as_str()) {
        bail!("section '{}' not found in {}", opts.section, opts.file.display());
    }
    for key in ini.enum_keys(opts.section.as_str()) {
        writeln!(out, "{key}")?;
    }
    Ok(())
}
