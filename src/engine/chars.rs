//! Byte ↔ character offset mapping for one input text.

use crate::Range;

/// Character-offset view of a text.
///
/// ASCII texts map offsets one to one and allocate nothing; otherwise the
/// byte offset of every character is recorded once so conversions are a
/// binary search.
#[derive(Debug)]
pub(crate) struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of each char, followed by `text.len()`. Empty for ASCII.
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let offsets = if text.is_ascii() {
            Vec::new()
        } else {
            text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect()
        };
        CharIndex { text, offsets }
    }

    pub(crate) fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn char_len(&self) -> usize {
        if self.offsets.is_empty() { self.text.len() } else { self.offsets.len() - 1 }
    }

    /// Character index of a byte offset that lies on a char boundary.
    pub(crate) fn to_char(&self, byte: usize) -> usize {
        if self.offsets.is_empty() { byte } else { self.offsets.partition_point(|&b| b < byte) }
    }

    /// Byte offset of a character index, clamped to the end of the text.
    pub(crate) fn to_byte(&self, ch: usize) -> usize {
        if self.offsets.is_empty() { ch.min(self.text.len()) } else { self.offsets[ch.min(self.char_len())] }
    }

    /// Character span of a regex match.
    pub(crate) fn span(&self, m: &regex::Match<'_>) -> Range {
        Range { start: self.to_char(m.start()), end: self.to_char(m.end()) }
    }

    /// Slice by character indices; out-of-range ends are clamped.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.to_byte(start);
        let to = self.to_byte(end.max(start));
        &self.text[from..to]
    }
}
