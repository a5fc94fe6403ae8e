//! Shared utilities: the crate error type and the small value types used to
//! describe lexeme ranges, hunks and flagged sub-spans.

pub mod errors;
pub mod spans;
pub mod text;

pub use errors::CoreError;
pub use spans::{IndexFlags, IndexLength, IndexPair, PosRange};
pub use text::IndexedText;

/// Number of characters (Unicode scalar values) in `text`
///
/// All offsets exposed by this crate are character offsets, so byte lengths
/// from `str::len` must never leak into position arithmetic.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by character offsets `[start, end)`
///
/// Returns `None` if the range is reversed or runs past the end of the text.
#[must_use]
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let mut indices = text.char_indices().map(|(i, _)| i).chain(core::iter::once(text.len()));
    let byte_start = indices.nth(start)?;
    let byte_end = if end > start {
        indices.nth(end - start - 1)?
    } else {
        byte_start
    };
    Some(&text[byte_start..byte_end])
}
