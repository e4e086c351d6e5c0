//! Command: print a file as JSON.
use std::io::Write;

use anyhow::Result;
use inifmt::Section;
use serde::Serialize;

use crate::cli::{FileOpts, GlobalOpts};
use crate::logging::Logger;

/// JSON shape of one section.
#[derive(Debug, Serialize)]
struct ExportedSection<'a> {
    name: &'a str,
    comment: &'a str,
    entries: Vec<ExportedEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    comments: Vec<&'a str>,
}

/// JSON shape of one keyed line.
#[derive(Debug, Serialize)]
struct ExportedEntry<'a> {
    key: &'a str,
    value: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    comment: &'a str,
}

impl<'a> From<&'a Section<String>> for ExportedSection<'a> {
    fn from(section: &'a Section<String>) -> Self {
        let (standalone, keyed): (Vec<_>, Vec<_>) = section
            .lines()
            .iter()
            .partition(|line| line.is_comment_only());
        Self {
            name: section.name(),
            comment: section.comment(),
            entries: keyed
                .into_iter()
                .map(|line| ExportedEntry {
                    key: &line.key,
                    value: &line.value,
                    comment: &line.comment,
                })
                .collect(),
            comments: standalone
                .into_iter()
                .map(|line| line.comment.as_str())
                .collect(),
        }
    }
}

/// Print every section with its entries as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or output cannot be written.
pub fn run(global: &GlobalOpts, opts: &FileOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let ini = super::open(&opts.file, global, log)?;
    let sections: Vec<ExportedSection<'_>> =
        ini.document().sections().map(ExportedSection::from).collect();
    serde_json::to_writer_pretty(&mut *out, &sections)?;
    writeln!(out)?;
    Ok(())
}
