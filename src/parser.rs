//! Single-pass recursive-descent scanner for INI text.
//!
//! Grammar (order matters):
//!
//! ```text
//! file           := section*
//! section        := section_header? line*
//! section_header := '[' section_name ']' comment? line_ending
//! line           := (key ('=' value)?)? comment? line_ending
//! key            := units up to CR, LF, '=' or ';'   (blanks trimmed)
//! value          := units up to CR, LF or ';'        (blanks trimmed)
//! comment        := ';' units up to CR or LF         (verbatim)
//! line_ending    := CR* (LF | end of input)
//! ```
//!
//! The scanner never commits partially: a document is either returned whole
//! or a [`ParseError`] points at the first offending position.
use crate::document::{Document, Line, Section};
use crate::error::{ParseError, ParseErrorKind};
use crate::text::{IniText, TextUnit};

/// Lexical variant used for keys and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Tokens wrapped in `"…"` are unwrapped on parse (with `\"` and `\\`
    /// escapes) and edge-blank tokens are re-quoted on dump.
    #[default]
    Escaped,
    /// Quotes carry no meaning; tokens are kept exactly as scanned.
    Raw,
}

/// Parse `input` into a [`Document`].
///
/// # Errors
///
/// Returns a [`ParseError`] for an unterminated `[` header, trailing junk
/// where a line ending is expected, or a truncated escape sequence.
pub fn parse<T: IniText>(input: &[T::Unit], quoting: Quoting) -> Result<Document<T>, ParseError> {
    Scanner::new(input, quoting).document()
}

/// Cursor over the input with line bookkeeping for error positions.
struct Scanner<'a, U> {
    input: &'a [U],
    pos: usize,
    line: usize,
    line_start: usize,
    quoting: Quoting,
}

impl<'a, U: TextUnit> Scanner<'a, U> {
    const fn new(input: &'a [U], quoting: Quoting) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
            quoting,
        }
    }

    fn document<T: IniText<Unit = U>>(mut self) -> Result<Document<T>, ParseError> {
        let mut document = Document::new();
        while !self.at_end() {
            let section = self.section()?;
            document.merge_section(section);
        }
        Ok(document)
    }

    fn section<T: IniText<Unit = U>>(&mut self) -> Result<Section<T>, ParseError> {
        let (name, comment) = self.section_header::<T>()?;
        let mut section = Section::new(name, comment);
        while let Some(line) = self.line()? {
            section.merge_line(line);
        }
        Ok(section)
    }

    /// Scan an optional `[name] ;comment` header.
    ///
    /// Yields empty name and comment when the cursor is not at `[`, which is
    /// how content before the first header lands in the global section.
    fn section_header<T: IniText<Unit = U>>(&mut self) -> Result<(T, T), ParseError> {
        self.skip_blanks();
        if !self.peek_is(b'[') {
            return Ok((T::default(), T::default()));
        }
        self.pos += 1;
        self.skip_blanks();
        let begin = self.pos;
        while let Some(unit) = self.peek() {
            if unit.is(b']') || unit.is(b'\r') || unit.is(b'\n') {
                break;
            }
            self.pos += 1;
        }
        if !self.peek_is(b']') {
            return Err(self.error(ParseErrorKind::UnterminatedSectionHeader));
        }
        let name = T::from_units(trim_blanks(self.slice(begin, self.pos)));
        self.pos += 1;
        let comment = self.comment();
        self.line_ending()?;
        Ok((name, comment))
    }

    /// Scan one line, or return `None` at a section header or end of input.
    fn line<T: IniText<Unit = U>>(&mut self) -> Result<Option<Line<T>>, ParseError> {
        self.skip_blanks();
        if self.at_end() || self.peek_is(b'[') {
            return Ok(None);
        }
        let key = self.token(|u| u.is(b'='))?;
        let value = if self.peek_is(b'=') {
            self.pos += 1;
            self.token(|_| false)?
        } else {
            T::default()
        };
        let comment = self.comment();
        self.line_ending()?;
        Ok(Some(Line {
            key,
            value,
            comment,
        }))
    }

    /// Scan a key or value up to CR, LF, `;` or an extra stop unit.
    fn token<T: IniText<Unit = U>>(&mut self, stop: impl Fn(U) -> bool) -> Result<T, ParseError> {
        self.skip_blanks();
        let begin = self.pos;
        while let Some(unit) = self.peek() {
            if unit.is(b'\r') || unit.is(b'\n') || unit.is(b';') || stop(unit) {
                break;
            }
            self.pos += 1;
        }
        let raw = trim_blanks(self.slice(begin, self.pos));
        match self.quoting {
            Quoting::Raw => Ok(T::from_units(raw)),
            Quoting::Escaped => unquote(raw)
                .map(|units| T::from_units(&units))
                .ok_or_else(|| self.error_at(ParseErrorKind::TruncatedEscape, begin)),
        }
    }

    /// Scan an optional `;comment`, returning the text after `;` verbatim.
    fn comment<T: IniText<Unit = U>>(&mut self) -> T {
        self.skip_blanks();
        if !self.peek_is(b';') {
            return T::default();
        }
        self.pos += 1;
        let begin = self.pos;
        while let Some(unit) = self.peek() {
            if unit.is(b'\r') || unit.is(b'\n') {
                break;
            }
            self.pos += 1;
        }
        T::from_units(self.slice(begin, self.pos))
    }

    /// Consume `CR* LF`, or accept end of input.
    fn line_ending(&mut self) -> Result<(), ParseError> {
        while self.peek_is(b'\r') {
            self.pos += 1;
        }
        if self.at_end() {
            return Ok(());
        }
        if !self.peek_is(b'\n') {
            return Err(self.error(ParseErrorKind::ExpectedLineEnd));
        }
        self.pos += 1;
        self.line += 1;
        self.line_start = self.pos;
        Ok(())
    }

    fn skip_blanks(&mut self) {
        while self.peek().is_some_and(TextUnit::is_blank) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<U> {
        self.input.get(self.pos).copied()
    }

    fn peek_is(&self, byte: u8) -> bool {
        self.peek().is_some_and(|u| u.is(byte))
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn slice(&self, begin: usize, end: usize) -> &'a [U] {
        self.input.get(begin..end).unwrap_or_default()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    const fn error_at(&self, kind: ParseErrorKind, pos: usize) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: pos - self.line_start + 1,
        }
    }
}

/// Strip leading and trailing spaces and tabs.
fn trim_blanks<U: TextUnit>(units: &[U]) -> &[U] {
    let start = units.iter().position(|u| !u.is_blank()).unwrap_or(units.len());
    let end = units
        .iter()
        .rposition(|u| !u.is_blank())
        .map_or(start, |last| last + 1);
    units.get(start..end).unwrap_or_default()
}

/// Unwrap a `"…"` token and resolve its backslash escapes.
///
/// Tokens that are not wrapped in quotes come back unchanged.  Returns `None`
/// when a backslash is the last unit inside the quotes.
fn unquote<U: TextUnit>(token: &[U]) -> Option<Vec<U>> {
    let inner = match token {
        [first, inner @ .., last] if first.is(b'"') && last.is(b'"') => inner,
        _ => return Some(token.to_vec()),
    };
    let mut out = Vec::with_capacity(inner.len());
    let mut units = inner.iter();
    while let Some(&unit) = units.next() {
        if unit.is(b'\\') {
            out.push(*units.next()?);
        } else {
            out.push(unit);
        }
    }
    Some(out)
}
