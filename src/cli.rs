use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use inifmt::{Options, Quoting};

/// Top-level CLI entry point for the INI formatter.
#[derive(Parser, Debug)]
#[command(
    name = "inifmt",
    about = "Query, edit and reformat INI files without losing comments",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Treat double quotes as ordinary characters
    #[arg(long, global = true)]
    pub raw: bool,
}

impl GlobalOpts {
    /// Facade options selected by the global flags.
    #[must_use]
    pub fn options(&self) -> Options {
        let quoting = if self.raw {
            Quoting::Raw
        } else {
            Quoting::Escaped
        };
        Options::default().with_quoting(quoting)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List section names
    Sections(FileOpts),
    /// List the keys of a section
    Keys(SectionOpts),
    /// Print a value
    Get(KeyOpts),
    /// Set a value, creating the file or section if needed
    Set(SetOpts),
    /// Remove a key
    Unset(KeyOpts),
    /// Add a section or update its comment
    AddSection(AddSectionOpts),
    /// Remove a section and all its keys
    RemoveSection(SectionOpts),
    /// Rewrite a file in canonical layout
    Fmt(FmtOpts),
    /// Print a file as JSON
    Export(FileOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sections(_) => "sections",
            Self::Keys(_) => "keys",
            Self::Get(_) => "get",
            Self::Set(_) => "set",
            Self::Unset(_) => "unset",
            Self::AddSection(_) => "add-section",
            Self::RemoveSection(_) => "remove-section",
            Self::Fmt(_) => "fmt",
            Self::Export(_) => "export",
            Self::Version => "version",
        }
    }
}

/// A file argument.
#[derive(Args, Debug, Clone)]
pub struct FileOpts {
    /// INI file to operate on
    pub file: PathBuf,
}

/// A file and a section (`""` for the global section).
#[derive(Args, Debug, Clone)]
pub struct SectionOpts {
    /// INI file to operate on
    pub file: PathBuf,
    /// Section name
    pub section: String,
}

/// A file, a section and a key.
#[derive(Args, Debug, Clone)]
pub struct KeyOpts {
    /// INI file to operate on
    pub file: PathBuf,
    /// Section name
    pub section: String,
    /// Key name
    pub key: String,
}

/// Options for the `set` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SetOpts {
    /// INI file to operate on
    pub file: PathBuf,
    /// Section name
    pub section: String,
    /// Key name
    pub key: String,
    /// New value
    pub value: String,
    /// Trailing comment for the line
    #[arg(short, long, default_value = "")]
    pub comment: String,
}

/// Options for the `add-section` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AddSectionOpts {
    /// INI file to operate on
    pub file: PathBuf,
    /// Section name
    pub section: String,
    /// Comment for the section header
    #[arg(short, long, default_value = "")]
    pub comment: String,
}

/// Options for the `fmt` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FmtOpts {
    /// INI file to operate on
    pub file: PathBuf,
    /// Fail instead of rewriting when the file is not formatted
    #[arg(long)]
    pub check: bool,
}
