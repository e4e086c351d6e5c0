//! Pretty printer turning a [`Document`] back into INI text.
//!
//! Output is canonical: `key = value` lines, CRLF line endings, one blank
//! line after every section, and trailing comments aligned to a common
//! column within each run of consecutive commented key lines.
use std::borrow::Cow;

use crate::document::{Document, Line, Section};
use crate::parser::Quoting;
use crate::text::{IniText, TextUnit};

/// Render `document` as text.
pub fn dump<T: IniText>(document: &Document<T>, quoting: Quoting) -> T {
    let mut writer = Writer {
        out: Vec::new(),
        quoting,
    };
    for section in document.sections() {
        writer.section(section);
        writer.newline();
    }
    T::from_units(&writer.out)
}

/// Returns `true` if the first or last unit is a space or tab.
pub fn has_edge_blank<U: TextUnit>(units: &[U]) -> bool {
    units.first().is_some_and(|u| u.is_blank()) || units.last().is_some_and(|u| u.is_blank())
}

/// Position of a token within a `key = value` line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Token {
    Key,
    Value,
}

/// Returns `true` if `token` would not survive a reparse unquoted.
///
/// A bare key opening with `[` would be read back as a section header.
fn needs_quotes<U: TextUnit>(token: &[U], role: Token) -> bool {
    has_edge_blank(token)
        || matches!(token, [first, .., last] if first.is(b'"') && last.is(b'"'))
        || (role == Token::Key && token.first().is_some_and(|u| u.is(b'[')))
}

/// Wrap `token` in quotes, escaping `\` and `"`, when it needs them.
fn escape<U: TextUnit>(token: &[U], role: Token, quoting: Quoting) -> Cow<'_, [U]> {
    if quoting == Quoting::Raw || !needs_quotes(token, role) {
        return Cow::Borrowed(token);
    }
    let quote = U::from_ascii(b'"');
    let backslash = U::from_ascii(b'\\');
    let mut out = Vec::with_capacity(token.len() + 2);
    out.push(quote);
    for &unit in token {
        if unit == quote || unit == backslash {
            out.push(backslash);
        }
        out.push(unit);
    }
    out.push(quote);
    Cow::Owned(out)
}

/// A line whose trailing comment takes part in column alignment.
fn is_aligned<T: IniText>(line: &Line<T>) -> bool {
    !line.is_comment_only() && !line.comment.is_empty()
}

struct Writer<U> {
    out: Vec<U>,
    quoting: Quoting,
}

impl<U: TextUnit> Writer<U> {
    fn section<T: IniText<Unit = U>>(&mut self, section: &Section<T>) {
        let lines = section.lines();
        let header_width = U::width(section.name().as_units()) + 2;
        let mut alignment = self.run_alignment(lines).max(header_width);

        if !section.name().is_empty() || !section.comment().is_empty() {
            self.ascii(b"[");
            self.units(section.name().as_units());
            self.ascii(b"]");
            self.comment(section.comment().as_units(), header_width, alignment);
            self.newline();
        }

        for (pos, line) in lines.iter().enumerate() {
            // A fresh run starts after any line that breaks alignment
            if pos > 0 && !lines.get(pos - 1).is_some_and(is_aligned) {
                alignment = self.run_alignment(lines.get(pos..).unwrap_or_default());
            }
            self.line(line, alignment);
        }
    }

    fn line<T: IniText<Unit = U>>(&mut self, line: &Line<T>, alignment: usize) {
        if line.is_comment_only() {
            if !line.comment.is_empty() {
                self.ascii(b";");
                self.units(line.comment.as_units());
            }
        } else {
            let key = escape(line.key.as_units(), Token::Key, self.quoting);
            let value = escape(line.value.as_units(), Token::Value, self.quoting);
            self.units(&key);
            self.ascii(b" = ");
            self.units(&value);
            let used = U::width(&key) + 3 + U::width(&value);
            self.comment(line.comment.as_units(), used, alignment);
        }
        self.newline();
    }

    /// Widest `key = value` among the aligned lines that open `lines`.
    fn run_alignment<T: IniText<Unit = U>>(&self, lines: &[Line<T>]) -> usize {
        lines
            .iter()
            .take_while(|&line| is_aligned(line))
            .map(|line| {
                U::width(&escape(line.key.as_units(), Token::Key, self.quoting))
                    + 3
                    + U::width(&escape(line.value.as_units(), Token::Value, self.quoting))
            })
            .max()
            .unwrap_or(0)
    }

    /// Emit ` ;comment` padded so that `;` lands one column past `alignment`.
    fn comment(&mut self, comment: &[U], used: usize, alignment: usize) {
        if comment.is_empty() {
            return;
        }
        let padding = alignment.saturating_sub(used) + 1;
        self.out
            .extend(std::iter::repeat_n(U::from_ascii(b' '), padding));
        self.ascii(b";");
        self.units(comment);
    }

    fn newline(&mut self) {
        self.ascii(b"\r\n");
    }

    fn ascii(&mut self, text: &[u8]) {
        self.out.extend(text.iter().map(|&b| U::from_ascii(b)));
    }

    fn units(&mut self, units: &[U]) {
        self.out.extend_from_slice(units);
    }
}
