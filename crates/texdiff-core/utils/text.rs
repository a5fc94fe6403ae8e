//! Character-indexed view of a source text
//!
//! Positions throughout the crate are character offsets. Slicing by
//! character offset on a plain `&str` is linear, so the diff engine builds
//! one byte-offset table per text and slices through it.

use super::CoreError;
use crate::Result;

/// Source text with a precomputed character to byte table
#[derive(Debug, Clone)]
pub struct IndexedText<'a> {
    /// Borrowed source
    text: &'a str,
    /// Byte offset of every character plus a trailing `text.len()`
    offsets: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    /// Index `text`
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(core::iter::once(text.len()))
            .collect();
        Self { text, offsets }
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Slice by character offsets `[start, end)`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] if the range is reversed or runs past
    /// the end. Lexeme positions always fit their text, so this indicates a
    /// defect in the caller.
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a str> {
        if start > end || end > self.len() {
            return Err(CoreError::internal(format!(
                "slice {start}..{end} outside text of {} characters",
                self.len()
            )));
        }
        Ok(&self.text[self.offsets[start]..self.offsets[end]])
    }
}
