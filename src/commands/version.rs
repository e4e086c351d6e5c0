//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string baked in by the build script, or the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("INIFMT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the inifmt version.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "inifmt {}", version())?;
    Ok(())
}
