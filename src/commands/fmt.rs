//! Command: rewrite a file in canonical layout.
use anyhow::{Context as _, Result, bail};
use inifmt::{FsStorage, Ini, IniText, Storage};

use crate::cli::{FmtOpts, GlobalOpts};
use crate::logging::Logger;

/// Reformat `file` in place, or with `--check` only verify it.
///
/// The canonical dump is compared with the exact bytes on disk, so a byte
/// order mark or stray line ending also counts as unformatted.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written, or if `--check`
/// finds that it is not formatted.
pub fn run(global: &GlobalOpts, opts: &FmtOpts, log: &Logger) -> Result<()> {
    log.stage(&format!("Formatting {}", opts.file.display()));
    let original = FsStorage
        .read(&opts.file)
        .with_context(|| format!("failed to read {}", opts.file.display()))?;
    let text = String::decode(&original)
        .with_context(|| format!("failed to decode {}", opts.file.display()))?;
    let mut ini: Ini = Ini::new().with_options(global.options());
    ini.parse(&text)
        .with_context(|| format!("failed to load {}", opts.file.display()))?;
    log.debug(&format!("parsed {} section(s)", ini.document().len()));
    let formatted = ini.dump().into_bytes();

    if formatted == original {
        log.info("already formatted");
        return Ok(());
    }
    if opts.check {
        bail!("{} is not formatted", opts.file.display());
    }
    ini.save(&opts.file)?;
    log.info(&format!("rewrote {} bytes", formatted.len()));
    Ok(())
}
