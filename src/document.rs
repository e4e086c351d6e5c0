//! In-memory document model: ordered sections holding ordered lines.
//!
//! Both levels keep an ordered sequence plus a key index in lock-step, so
//! lookups are O(1) while iteration and serialization follow first-appearance
//! order.  Indices are plain positions, never references into the sequence,
//! which keeps every mutation safe.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::parser::{self, Quoting};
use crate::serializer;
use crate::text::IniText;

/// One `key = value ;comment` triple, or a comment-only line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line<T> {
    /// Key text; empty for comment-only lines.
    pub key: T,
    /// Raw, unescaped value text.
    pub value: T,
    /// Trailing comment without the leading `;`, kept verbatim.
    pub comment: T,
}

impl<T: IniText> Line<T> {
    /// Create a key/value line.
    pub fn new(key: impl Into<T>, value: impl Into<T>, comment: impl Into<T>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: comment.into(),
        }
    }

    /// Create a line that only carries a comment.
    pub fn comment(comment: impl Into<T>) -> Self {
        Self {
            comment: comment.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the line has neither key nor value.
    ///
    /// Such lines are not addressable by key; they are kept in order so that
    /// several standalone comments in one section all survive.
    pub fn is_comment_only(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    /// Returns `true` if the line carries nothing at all.
    pub fn is_blank(&self) -> bool {
        self.is_comment_only() && self.comment.is_empty()
    }
}

/// A named group of lines.  The empty name denotes the global section.
#[derive(Debug, Clone)]
pub struct Section<T> {
    name: T,
    comment: T,
    lines: Vec<Line<T>>,
    index: HashMap<T, usize>,
}

impl<T: IniText> PartialEq for Section<T> {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from `lines`
        self.name == other.name && self.comment == other.comment && self.lines == other.lines
    }
}

impl<T: IniText> Eq for Section<T> {}

impl<T: IniText> Section<T> {
    /// Create an empty section.
    pub fn new(name: impl Into<T>, comment: impl Into<T>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            lines: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Section name (empty for the global section).
    pub const fn name(&self) -> &T {
        &self.name
    }

    /// Comment attached to the `[name]` header line.
    pub const fn comment(&self) -> &T {
        &self.comment
    }

    /// Replace the header comment.  Returns `false` if it was already equal.
    pub fn set_comment(&mut self, comment: impl Into<T>) -> bool {
        let comment = comment.into();
        if self.comment == comment {
            return false;
        }
        self.comment = comment;
        true
    }

    /// All lines in order, comment-only lines included.
    pub fn lines(&self) -> &[Line<T>] {
        &self.lines
    }

    /// Number of lines, comment-only lines included.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the section holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if a keyed line named `key` exists.
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Look up the line stored under `key`.
    pub fn line<Q>(&self, key: &Q) -> Option<&Line<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|&pos| self.lines.get(pos))
    }

    /// Look up the value stored under `key`.
    pub fn value<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.line(key).map(|line| &line.value)
    }

    /// Keys of all keyed lines in order.
    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.keyed_lines().map(|line| &line.key)
    }

    /// `(key, value)` pairs of all keyed lines in order.
    pub fn entries(&self) -> impl Iterator<Item = (&T, &T)> {
        self.keyed_lines().map(|line| (&line.key, &line.value))
    }

    /// Insert or overwrite `key`.
    ///
    /// An existing key keeps its position; only its value and comment change.
    /// Returns `false` if the stored value and comment were already equal.
    ///
    /// An empty key and value with a comment appends a comment-only line;
    /// with no comment either, nothing is stored and `false` is returned.
    pub fn set(&mut self, key: impl Into<T>, value: impl Into<T>, comment: impl Into<T>) -> bool {
        self.insert(Line::new(key, value, comment))
    }

    /// Append a comment-only line.
    pub fn push_comment(&mut self, comment: impl Into<T>) {
        self.lines.push(Line::comment(comment));
    }

    /// Remove the line stored under `key`, returning it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Line<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let pos = self.index.remove(key)?;
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(self.lines.remove(pos))
    }

    /// Fold a freshly scanned line into the section by the
    /// [`set`](Self::set) rule.
    pub(crate) fn merge_line(&mut self, line: Line<T>) {
        self.insert(line);
    }

    /// Drop blank lines, append comment-only lines, upsert keyed lines.
    fn insert(&mut self, line: Line<T>) -> bool {
        if line.is_blank() {
            return false;
        }
        if line.is_comment_only() {
            self.lines.push(line);
            return true;
        }
        self.upsert(line)
    }

    fn upsert(&mut self, line: Line<T>) -> bool {
        if let Some(existing) = self
            .index
            .get(&line.key)
            .and_then(|&pos| self.lines.get_mut(pos))
        {
            if existing.value == line.value && existing.comment == line.comment {
                return false;
            }
            existing.value = line.value;
            existing.comment = line.comment;
            return true;
        }
        self.index.insert(line.key.clone(), self.lines.len());
        self.lines.push(line);
        true
    }

    fn keyed_lines(&self) -> impl Iterator<Item = &Line<T>> {
        self.lines.iter().filter(|line| !line.is_comment_only())
    }
}

/// A whole INI document: sections in first-appearance order, unique by name.
///
/// # Examples
///
/// ```
/// use inifmt::Document;
///
/// let mut doc = Document::<String>::new();
/// doc.set_value("server", "port", "8080", "");
/// assert_eq!(doc.get_value("server", "port").map(String::as_str), Some("8080"));
/// assert_eq!(doc.dump(), "[server]\r\nport = 8080\r\n\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct Document<T: IniText = String> {
    sections: IndexMap<T, Section<T>>,
}

impl<T: IniText> PartialEq for Document<T> {
    fn eq(&self, other: &Self) -> bool {
        // Section order is part of the document
        self.sections.iter().eq(other.sections.iter())
    }
}

impl<T: IniText> Eq for Document<T> {}

impl<T: IniText> Default for Document<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IniText> Document<T> {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: IndexMap::new(),
        }
    }

    /// Parse `text` with the default [`Quoting::Escaped`] lexeme.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if any header or line fails to scan.
    pub fn parse(text: &(impl AsRef<[T::Unit]> + ?Sized)) -> Result<Self, ParseError> {
        Self::parse_with(text, Quoting::default())
    }

    /// Parse `text` with an explicit quoting variant.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if any header or line fails to scan.
    pub fn parse_with(
        text: &(impl AsRef<[T::Unit]> + ?Sized),
        quoting: Quoting,
    ) -> Result<Self, ParseError> {
        parser::parse(text.as_ref(), quoting)
    }

    /// Serialize with the default [`Quoting::Escaped`] lexeme.
    #[must_use]
    pub fn dump(&self) -> T {
        self.dump_with(Quoting::default())
    }

    /// Serialize with an explicit quoting variant.
    #[must_use]
    pub fn dump_with(&self, quoting: Quoting) -> T {
        serializer::dump(self, quoting)
    }

    /// Sections in order.
    pub fn sections(&self) -> impl Iterator<Item = &Section<T>> {
        self.sections.values()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by name.
    pub fn section<Q>(&self, name: &Q) -> Option<&Section<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sections.get(name)
    }

    /// Look up a section by name for editing.
    pub fn section_mut<Q>(&mut self, name: &Q) -> Option<&mut Section<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sections.get_mut(name)
    }

    /// Returns `true` if a section named `name` exists.
    pub fn has_section<Q>(&self, name: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sections.contains_key(name)
    }

    /// Section names in order.
    pub fn section_names(&self) -> Vec<&T> {
        self.sections.keys().collect()
    }

    /// Create a section, or update the comment of an existing one.
    ///
    /// Returns `false` if the section exists and its comment is unchanged.
    pub fn add_section(&mut self, name: impl Into<T>, comment: impl Into<T>) -> bool {
        let name = name.into();
        let comment = comment.into();
        if let Some(section) = self.sections.get_mut(&name) {
            return section.set_comment(comment);
        }
        self.sections.insert(name.clone(), Section::new(name, comment));
        true
    }

    /// Remove a section and all its lines.  Returns `false` if it was absent.
    pub fn remove_section<Q>(&mut self, name: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sections.shift_remove(name).is_some()
    }

    /// Returns `true` if `section` holds a keyed line named `key`.
    pub fn has_key<Q>(&self, section: &Q, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.section(section).is_some_and(|s| s.has_key(key))
    }

    /// Keys of `section` in order; empty if the section is absent.
    pub fn keys<Q>(&self, section: &Q) -> Vec<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.section(section)
            .map(|s| s.keys().collect())
            .unwrap_or_default()
    }

    /// `(key, value)` pairs of `section` in order; empty if the section is absent.
    pub fn key_values<Q>(&self, section: &Q) -> Vec<(&T, &T)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.section(section)
            .map(|s| s.entries().collect())
            .unwrap_or_default()
    }

    /// Value of `key` in `section`.
    ///
    /// `None` means the section or key is absent; a present key with an empty
    /// value yields `Some` of empty text.
    pub fn get_value<Q>(&self, section: &Q, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.section(section).and_then(|s| s.value(key))
    }

    /// Set `key` in `section`, creating the section if needed.
    ///
    /// Returns `false` if the stored value and comment were already equal.
    pub fn set_value(
        &mut self,
        section: impl Into<T>,
        key: impl Into<T>,
        value: impl Into<T>,
        comment: impl Into<T>,
    ) -> bool {
        let line = Line::new(key, value, comment);
        if line.is_blank() {
            return false;
        }
        let name = section.into();
        self.sections
            .entry(name.clone())
            .or_insert_with(|| Section::new(name, T::default()))
            .insert(line)
    }

    /// Remove `key` from `section`.  Returns `false` if either was absent.
    pub fn remove_value<Q>(&mut self, section: &Q, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.section_mut(section)
            .and_then(|s| s.remove(key))
            .is_some()
    }

    /// Fold a freshly scanned section into the document.
    ///
    /// A repeated name merges into the first occurrence: its lines are
    /// upserted there and a non-empty header comment replaces the old one.
    pub(crate) fn merge_section(&mut self, section: Section<T>) {
        if let Some(existing) = self.sections.get_mut(&section.name) {
            if !section.comment.is_empty() {
                existing.comment = section.comment;
            }
            for line in section.lines {
                existing.merge_line(line);
            }
        } else {
            self.sections.insert(section.name.clone(), section);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::text::{WideText, widen};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_section("a", "");
        doc.set_value("a", "k1", "v1", "");
        doc.set_value("a", "k2", "v2", "");
        doc.set_value("a", "k3", "v3", "");
        doc.add_section("b", "second");
        doc
    }

    #[test]
    fn add_section_reports_changes() {
        let mut doc = Document::<String>::new();
        assert!(doc.add_section("s", "c"));
        assert!(!doc.add_section("s", "c"), "unchanged comment is a no-op");
        assert!(doc.add_section("s", "new"), "comment update counts as change");
        assert_eq!(doc.section("s").unwrap().comment(), "new");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn set_value_creates_section_with_empty_comment() {
        let mut doc = Document::<String>::new();
        assert!(doc.set_value("s", "k", "v", "line comment"));
        let section = doc.section("s").expect("section created");
        assert_eq!(section.comment(), "");
        assert_eq!(section.line("k").unwrap().comment, "line comment");
    }

    #[test]
    fn set_value_overwrites_in_place() {
        let mut doc = sample();
        assert!(doc.set_value("a", "k1", "changed", "c"));
        assert_eq!(doc.keys("a"), ["k1", "k2", "k3"]);
        assert_eq!(doc.get_value("a", "k1").unwrap(), "changed");
    }

    #[test]
    fn set_value_same_content_is_noop() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(!doc.set_value("a", "k2", "v2", ""));
        assert_eq!(doc, before);
        assert_eq!(doc.section_names(), ["a", "b"]);
        assert_eq!(doc.keys("a"), ["k1", "k2", "k3"]);
    }

    #[test]
    fn equality_respects_section_order() {
        let mut ab = Document::<String>::new();
        ab.add_section("a", "");
        ab.add_section("b", "");
        let mut ba = Document::<String>::new();
        ba.add_section("b", "");
        ba.add_section("a", "");
        assert_ne!(ab, ba);
    }

    #[test]
    fn set_blank_line_is_noop() {
        let mut doc = Document::<String>::new();
        assert!(doc.set_value("s", "a", "1", ""));
        assert!(!doc.set_value("s", "", "", ""));
        assert!(doc.set_value("s", "b", "2", ""));
        assert_eq!(doc.section("s").unwrap().len(), 2);
        assert_eq!(doc.dump(), "[s]\r\na = 1\r\nb = 2\r\n\r\n");
        assert!(!doc.set_value("t", "", "", ""), "blank line creates nothing");
        assert!(!doc.has_section("t"));
    }

    #[test]
    fn set_comment_without_key_is_unkeyed() {
        let mut doc = Document::<String>::new();
        assert!(doc.set_value("s", "", "", "note"));
        assert!(!doc.has_key("s", ""));
        assert!(doc.keys("s").is_empty());
        assert_eq!(doc.section("s").unwrap().lines()[0].comment, "note");

        let reparsed = Document::<String>::parse(&doc.dump()).unwrap();
        assert!(!reparsed.has_key("s", ""));
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn remove_value_keeps_index_in_step() {
        let mut doc = sample();
        assert!(doc.remove_value("a", "k1"));
        assert!(!doc.remove_value("a", "k1"));
        assert_eq!(doc.get_value("a", "k2").unwrap(), "v2");
        assert_eq!(doc.get_value("a", "k3").unwrap(), "v3");
        assert!(doc.set_value("a", "k3", "v3b", ""));
        assert_eq!(
            doc.key_values("a"),
            [
                (&"k2".to_string(), &"v2".to_string()),
                (&"k3".to_string(), &"v3b".to_string())
            ]
        );
    }

    #[test]
    fn remove_value_on_missing_section() {
        let mut doc = sample();
        assert!(!doc.remove_value("missing", "k1"));
    }

    #[test]
    fn remove_section_preserves_order() {
        let mut doc = sample();
        doc.add_section("c", "");
        assert!(doc.remove_section("b"));
        assert!(!doc.remove_section("b"));
        assert_eq!(doc.section_names(), ["a", "c"]);
    }

    #[test]
    fn absent_and_empty_values_are_distinct() {
        let mut doc = Document::<String>::new();
        doc.set_value("s", "empty", "", "");
        assert_eq!(doc.get_value("s", "empty").map(String::as_str), Some(""));
        assert_eq!(doc.get_value("s", "missing"), None);
        assert_eq!(doc.get_value("missing", "k"), None);
    }

    #[test]
    fn comment_lines_are_not_keys() {
        let mut section = Section::<String>::new("s", "");
        section.push_comment(" first");
        section.push_comment(" second");
        section.set("k", "v", "");
        assert_eq!(section.len(), 3);
        assert_eq!(section.keys().collect::<Vec<_>>(), ["k"]);
        assert!(!section.has_key(""));
    }

    #[test]
    fn merge_line_drops_blank_lines() {
        let mut section = Section::<String>::new("s", "");
        section.merge_line(Line::default());
        assert!(section.is_empty());
    }

    #[test]
    fn merge_section_folds_into_first_occurrence() {
        let mut doc = sample();
        let mut again = Section::new("a", "replaced");
        again.set("k2", "new", "");
        again.set("k4", "v4", "");
        doc.merge_section(again);
        doc.merge_section(Section::new("a", ""));
        let a = doc.section("a").unwrap();
        assert_eq!(a.comment(), "replaced", "empty comment does not overwrite");
        assert_eq!(a.keys().collect::<Vec<_>>(), ["k1", "k2", "k3", "k4"]);
        assert_eq!(a.value("k2").unwrap(), "new");
    }

    #[test]
    fn wide_document_lookups_by_slice() {
        let mut doc = Document::<WideText>::new();
        doc.set_value(widen("s"), widen("k"), widen("v"), WideText::new());
        assert!(doc.has_key(widen("s").as_slice(), widen("k").as_slice()));
        assert_eq!(
            doc.get_value(widen("s").as_slice(), widen("k").as_slice()),
            Some(&widen("v"))
        );
    }
}
