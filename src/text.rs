//! Text element abstraction shared by the parser and serializer.
//!
//! The grammar only ever inspects ASCII delimiters (`[`, `]`, `=`, `;`, `"`,
//! `\`, blanks and line endings), so a single scanner can run over any text
//! whose code units embed ASCII unchanged.  Two encodings are supported:
//!
//! - [`String`]: narrow UTF-8 text scanned byte by byte
//! - [`WideText`] (`Vec<u16>`): wide UTF-16 text scanned unit by unit
//!
//! Byte-level decoding (with BOM auto-detection) and encoding also live here
//! so that the storage layer never needs to know which encoding a document
//! uses.
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::DecodeError;

/// Wide (UTF-16) document text.
pub type WideText = Vec<u16>;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// A single code unit of document text.
pub trait TextUnit: Copy + Eq + Debug {
    /// Widen an ASCII byte into this unit type.
    fn from_ascii(byte: u8) -> Self;

    /// Number of display columns occupied by `units`.
    ///
    /// Used by the serializer to align trailing comments.  Counts characters
    /// rather than code units so that multi-unit characters do not skew
    /// alignment.
    fn width(units: &[Self]) -> usize;

    /// Returns `true` if this unit is the ASCII character `byte`.
    fn is(self, byte: u8) -> bool {
        self == Self::from_ascii(byte)
    }

    /// Returns `true` for a space or horizontal tab.
    fn is_blank(self) -> bool {
        self.is(b' ') || self.is(b'\t')
    }
}

impl TextUnit for u8 {
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn width(units: &[Self]) -> usize {
        // UTF-8 continuation bytes carry no column of their own
        units.iter().filter(|&&b| b & 0xC0 != 0x80).count()
    }
}

impl TextUnit for u16 {
    fn from_ascii(byte: u8) -> Self {
        Self::from(byte)
    }

    fn width(units: &[Self]) -> usize {
        // Low surrogates complete a pair started by a high surrogate
        units
            .iter()
            .filter(|&&u| !(0xDC00..=0xDFFF).contains(&u))
            .count()
    }
}

/// Owned text type a [`Document`](crate::Document) is built from.
pub trait IniText: Clone + Default + Eq + Hash + Debug {
    /// Code unit the scanner walks over.
    type Unit: TextUnit;

    /// Borrow the text as a slice of code units.
    fn as_units(&self) -> &[Self::Unit];

    /// Build owned text from a slice of code units.
    ///
    /// Slices handed in by the parser always begin and end on ASCII
    /// boundaries, so no information is lost for well-formed input.
    fn from_units(units: &[Self::Unit]) -> Self;

    /// Decode raw file bytes, honouring a leading byte-order mark.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the bytes are not valid in the detected
    /// encoding.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;

    /// Encode the text into the bytes written back to disk.
    fn encode(&self) -> Vec<u8>;

    /// Returns `true` if the text has no units.
    fn is_empty(&self) -> bool {
        self.as_units().is_empty()
    }
}

impl IniText for String {
    type Unit = u8;

    fn as_units(&self) -> &[u8] {
        self.as_bytes()
    }

    fn from_units(units: &[u8]) -> Self {
        Self::from_utf8_lossy(units).into_owned()
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
            return Self::from_utf8(rest.to_vec()).map_err(|_| DecodeError::InvalidUtf8);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
            let units = utf16_units(rest, true)?;
            return Self::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
            let units = utf16_units(rest, false)?;
            return Self::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16);
        }
        Self::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl IniText for Vec<u16> {
    type Unit = u16;

    fn as_units(&self) -> &[u16] {
        self
    }

    fn from_units(units: &[u16]) -> Self {
        units.to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
            return utf16_units(rest, true);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
            return utf16_units(rest, false);
        }
        let narrow = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(narrow).map_err(|_| DecodeError::InvalidUtf8)?;
        Ok(text.encode_utf16().collect())
    }

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(UTF16_LE_BOM.len() + self.len() * 2);
        bytes.extend_from_slice(&UTF16_LE_BOM);
        for unit in self {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }
}

/// Convert narrow text into wide text.
#[must_use]
pub fn widen(text: &str) -> WideText {
    text.encode_utf16().collect()
}

/// Split raw bytes into UTF-16 code units of the given byte order.
fn utf16_units(bytes: &[u8], little_endian: bool) -> Result<Vec<u16>, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength);
    }
    Ok(bytes
        .chunks_exact(2)
        .filter_map(|pair| match *pair {
            [a, b] if little_endian => Some(u16::from_le_bytes([a, b])),
            [a, b] => Some(u16::from_be_bytes([a, b])),
            _ => None,
        })
        .collect())
}
