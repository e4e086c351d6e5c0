//! Error types for the INI engine.
//!
//! Library modules return typed errors built with [`thiserror`]; the command
//! handlers of the `inifmt` binary convert them to [`anyhow::Error`] via the
//! standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! IniError
//! ├── Parse(ParseError)          # in-memory text failed to parse
//! ├── Syntax { file, source }    # a loaded file failed to parse
//! ├── Decode { path, source }    # file bytes are not valid text
//! └── Io { path, source }        # the storage collaborator failed
//! ```
//!
//! Absence of a section or key is never an error; queries return `Option`
//! or `false` instead.

use thiserror::Error;

/// Top-level error type for loading, parsing and persisting documents.
#[derive(Error, Debug)]
pub enum IniError {
    /// Text handed to [`Ini::parse`](crate::Ini::parse) is malformed.
    #[error("Invalid INI syntax: {0}")]
    Parse(#[from] ParseError),

    /// A file read through [`Ini::load`](crate::Ini::load) is malformed.
    #[error("Invalid INI syntax in {file}: {source}")]
    Syntax {
        /// Path of the offending file.
        file: String,
        /// Location and kind of the syntax error.
        source: ParseError,
    },

    /// File bytes could not be decoded into document text.
    #[error("Cannot decode {path}: {source}")]
    Decode {
        /// Path of the file that could not be decoded.
        path: String,
        /// Underlying decoding failure.
        source: DecodeError,
    },

    /// The storage collaborator failed to read or write a file.
    #[error("IO error accessing {path}: {source}")]
    Io {
        /// Path of the file that could not be accessed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl IniError {
    /// Returns `true` if this error reports a file that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A syntax error with its 1-based position in the input.
///
/// `column` counts text units (bytes for narrow text, UTF-16 units for wide
/// text) from the start of the line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("line {line}, column {column}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

/// The ways a document can fail to scan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `[` header is not closed by `]` on the same line.
    #[error("unterminated section header, expected ']'")]
    UnterminatedSectionHeader,

    /// Something other than a comment or a line ending follows a header or
    /// line, e.g. a bare carriage return.
    #[error("expected end of line")]
    ExpectedLineEnd,

    /// A quoted token ends with a lone backslash.
    #[error("truncated escape sequence in quoted token")]
    TruncatedEscape,
}

/// Errors that arise when turning file bytes into document text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,

    /// The bytes are not valid UTF-16 (unpaired surrogate).
    #[error("invalid UTF-16")]
    InvalidUtf16,

    /// A UTF-16 byte stream has an odd number of bytes.
    #[error("UTF-16 data has an odd byte length")]
    OddLength,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ParseError
    // -----------------------------------------------------------------------

    #[test]
    fn parse_error_display_includes_position() {
        let e = ParseError {
            kind: ParseErrorKind::UnterminatedSectionHeader,
            line: 3,
            column: 7,
        };
        assert_eq!(
            e.to_string(),
            "line 3, column 7: unterminated section header, expected ']'"
        );
    }

    #[test]
    fn parse_error_kind_display() {
        assert_eq!(
            ParseErrorKind::ExpectedLineEnd.to_string(),
            "expected end of line"
        );
        assert_eq!(
            ParseErrorKind::TruncatedEscape.to_string(),
            "truncated escape sequence in quoted token"
        );
    }

    // -----------------------------------------------------------------------
    // IniError
    // -----------------------------------------------------------------------

    #[test]
    fn ini_error_from_parse_error() {
        let e: IniError = ParseError {
            kind: ParseErrorKind::ExpectedLineEnd,
            line: 1,
            column: 4,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Invalid INI syntax: line 1, column 4: expected end of line"
        );
    }

    #[test]
    fn ini_error_syntax_display() {
        let e = IniError::Syntax {
            file: "app.ini".to_string(),
            source: ParseError {
                kind: ParseErrorKind::TruncatedEscape,
                line: 2,
                column: 9,
            },
        };
        assert!(e.to_string().starts_with("Invalid INI syntax in app.ini"));
    }

    #[test]
    fn ini_error_io_has_source() {
        use std::error::Error as StdError;
        let e = IniError::Io {
            path: "/etc/app.ini".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/etc/app.ini"));
    }

    #[test]
    fn ini_error_is_not_found() {
        let missing = IniError::Io {
            path: "missing.ini".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let denied = IniError::Io {
            path: "locked.ini".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert!(!IniError::Decode {
            path: "x.ini".to_string(),
            source: DecodeError::InvalidUtf8,
        }
        .is_not_found());
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(DecodeError::OddLength.to_string(), "UTF-16 data has an odd byte length");
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<IniError>();
        assert_send_sync::<ParseError>();
        assert_send_sync::<DecodeError>();
    }

    #[test]
    fn ini_error_converts_to_anyhow() {
        let e = IniError::Decode {
            path: "x.ini".to_string(),
            source: DecodeError::InvalidUtf16,
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
