//! Round-trip preserving INI document engine.
//!
//! Parses INI text into an ordered, comment-preserving document model, edits
//! it, and writes it back in a canonical, column-aligned layout.  Narrow
//! UTF-8 and wide UTF-16 text share one parser and serializer.
//!
//! The public API is organised into four layers:
//!
//! - **[`text`]**: text element abstraction, decoding and encoding
//! - **[`parser`]** / **[`serializer`]**: grammar and canonical layout
//! - **[`document`]**: ordered sections and lines with keyed lookup
//! - **[`ini`]** / **[`file`]**: the file-bound facade with auto-save, and
//!   one-shot helpers built on it
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod document;
pub mod error;
pub mod file;
pub mod ini;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod storage;
pub mod text;

pub use document::{Document, Line, Section};
pub use error::{DecodeError, IniError, ParseError, ParseErrorKind};
pub use ini::Ini;
pub use options::{AutoSave, Options};
pub use parser::Quoting;
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use text::{IniText, TextUnit, WideText, widen};
