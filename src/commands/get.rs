//! Command: print a single value.
use std::io::Write;

use anyhow::{Result, bail};

use crate::cli::{GlobalOpts, KeyOpts};
use crate::logging::Logger;

/// Print the value of `key` in `section`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the key is absent.
pub fn run(global: &GlobalOpts, opts: &KeyOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let ini = super::open(&opts.file, global, log)?;
    let Some(value) = ini.get_value(opts.section.as_str(), opts.key.as_str()) else {
        bail!(
            "key '{}' not found in section '{}' of {}",
            opts.key,
            opts.section,
            opts.file.display()
        );
    };
    writeln!(out, "{value}")?;
    Ok(())
}
