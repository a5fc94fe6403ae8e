//! Attributed text backed by a rope
//!
//! [`AttributedText`] keeps the characters in a `ropey::Rope` and their
//! styles in a parallel list of runs. Run lengths always sum to the number
//! of characters, and neighbouring runs never share an attribute.

use core::fmt;
use ropey::Rope;
use texdiff_core::{ChangeFlags, PosRange};

use super::errors::{EditorError, Result};
use super::style::{Attribute, StyleChunk};

/// A stretch of characters sharing one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    /// Number of characters
    len: usize,
    attribute: Attribute,
}

/// Text with a style per character
///
/// All offsets and lengths are character counts.
///
/// # Examples
///
/// ```
/// use texdiff_editor::{AttributedText, Attribute, ChangeFlags};
///
/// let mut text = AttributedText::from_text("Hello world");
/// text.insert(6, "brave ", Attribute::addition(1, None, ChangeFlags::empty()))?;
/// assert_eq!(text.text(), "Hello brave world");
/// assert!(text.is_addition(6)?);
/// assert!(!text.is_addition(12)?);
/// # Ok::<(), texdiff_editor::EditorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributedText {
    /// Characters of the text
    rope: Rope,
    /// Styles, in text order
    runs: Vec<Run>,
}

impl AttributedText {
    /// Create an empty text
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text with every character plain
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let len = rope.len_chars();
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![Run {
                len,
                attribute: Attribute::plain(),
            }]
        };
        Self { rope, runs }
    }

    /// Number of characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The whole text
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Characters in `[start, end)`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if the range is reversed or
    /// extends past the end.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Reject an insertion point past the end
    fn check_position(&self, position: usize) -> Result<()> {
        if position > self.len() {
            return Err(EditorError::PositionOutOfBounds {
                position,
                length: self.len(),
            });
        }
        Ok(())
    }

    /// Reject a reversed range or one running past the end
    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len() {
            return Err(EditorError::InvalidRange {
                start,
                end,
                length: self.len(),
            });
        }
        Ok(())
    }

    /// End of `length` characters from `offset`, checked against the text
    fn range_end(&self, offset: usize, length: usize) -> Result<usize> {
        let end = offset
            .checked_add(length)
            .ok_or(EditorError::InvalidRange {
                start: offset,
                end: usize::MAX,
                length: self.len(),
            })?;
        self.check_range(offset, end)?;
        Ok(end)
    }

    /// Make `offset` a run boundary and return the index of the run starting there
    fn split_at(&mut self, offset: usize) -> usize {
        let mut at = 0;
        for index in 0..self.runs.len() {
            if at == offset {
                return index;
            }
            let run = self.runs[index];
            if offset < at + run.len {
                let head = offset - at;
                self.runs[index].len = head;
                self.runs.insert(
                    index + 1,
                    Run {
                        len: run.len - head,
                        attribute: run.attribute,
                    },
                );
                return index + 1;
            }
            at += run.len;
        }
        self.runs.len()
    }

    /// Drop empty runs and merge neighbours with equal attributes
    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..).filter(|r| r.len > 0) {
            match merged.last_mut() {
                Some(last) if last.attribute == run.attribute => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Insert `text` at `offset` with one attribute
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PositionOutOfBounds`] if `offset` is past the end.
    pub fn insert(&mut self, offset: usize, text: &str, attribute: Attribute) -> Result<()> {
        self.check_position(offset)?;
        let len = text.chars().count();
        if len == 0 {
            return Ok(());
        }
        let index = self.split_at(offset);
        self.runs.insert(index, Run { len, attribute });
        self.rope.insert(offset, text);
        self.normalize();
        Ok(())
    }

    /// Remove `length` characters starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if the range extends past the end.
    pub fn remove(&mut self, offset: usize, length: usize) -> Result<()> {
        let end = self.range_end(offset, length)?;
        if length == 0 {
            return Ok(());
        }
        let first = self.split_at(offset);
        let last = self.split_at(end);
        self.runs.drain(first..last);
        self.rope.remove(offset..end);
        self.normalize();
        Ok(())
    }

    /// Style `length` characters starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if the range extends past the end.
    pub fn set_style(&mut self, offset: usize, length: usize, attribute: Attribute) -> Result<()> {
        self.restyle(offset, length, attribute, false)
    }

    /// Style only the characters of the range that are still plain
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRange`] if the range extends past the end.
    pub fn set_style_if_plain(
        &mut self,
        offset: usize,
        length: usize,
        attribute: Attribute,
    ) -> Result<()> {
        self.restyle(offset, length, attribute, true)
    }

    /// Set the attribute of a range, optionally sparing styled runs
    fn restyle(
        &mut self,
        offset: usize,
        length: usize,
        attribute: Attribute,
        only_plain: bool,
    ) -> Result<()> {
        let end = self.range_end(offset, length)?;
        if length == 0 {
            return Ok(());
        }
        let first = self.split_at(offset);
        let last = self.split_at(end);
        for run in &mut self.runs[first..last] {
            if !only_plain || run.attribute.is_plain() {
                run.attribute = attribute;
            }
        }
        self.normalize();
        Ok(())
    }

    /// Attribute of the character at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PositionOutOfBounds`] unless `offset < len()`.
    pub fn attribute_at(&self, offset: usize) -> Result<Attribute> {
        self.runs()
            .find(|(range, _)| range.contains(offset))
            .map(|(_, attribute)| attribute)
            .ok_or(EditorError::PositionOutOfBounds {
                position: offset,
                length: self.len(),
            })
    }

    /// Check if the character at `offset` is styled as added
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PositionOutOfBounds`] unless `offset < len()`.
    pub fn is_addition(&self, offset: usize) -> Result<bool> {
        Ok(self.attribute_at(offset)?.is_addition())
    }

    /// Check if the character at `offset` is styled as deleted
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PositionOutOfBounds`] unless `offset < len()`.
    pub fn is_deletion(&self, offset: usize) -> Result<bool> {
        Ok(self.attribute_at(offset)?.is_deletion())
    }

    /// Filter out changes whose flags intersect `hide`
    ///
    /// Deleted characters with such flags are removed from the text; added
    /// characters with such flags become plain.
    pub fn hide(&mut self, hide: ChangeFlags) {
        if hide.is_empty() {
            return;
        }
        let hidden = |attribute: &Attribute| attribute.flags.intersects(hide);

        let mut removals: Vec<(usize, usize)> = Vec::new();
        let mut offset = 0;
        for run in &mut self.runs {
            if hidden(&run.attribute) {
                if run.attribute.is_deletion() {
                    removals.push((offset, offset + run.len));
                } else if run.attribute.is_addition() {
                    run.attribute = Attribute::plain();
                }
            }
            offset += run.len;
        }

        for &(start, end) in removals.iter().rev() {
            self.rope.remove(start..end);
        }
        self.runs
            .retain(|run| !(run.attribute.is_deletion() && hidden(&run.attribute)));
        self.normalize();

        log::debug!(
            "hid {} flag(s): removed {} deleted range(s)",
            hide.bits().count_ones(),
            removals.len()
        );
    }

    /// Styled ranges in text order, plain ranges included
    pub fn runs(&self) -> impl Iterator<Item = (PosRange, Attribute)> + '_ {
        self.runs.iter().scan(0, |offset, run| {
            let range = PosRange::with_len(*offset, run.len);
            *offset += run.len;
            Some((range, run.attribute))
        })
    }

    /// Maximal styled ranges for rendering
    #[must_use]
    pub fn chunks(&self) -> Vec<StyleChunk> {
        StyleChunk::compact(self.runs().map(|(range, a)| (range.start, range.end, a)))
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl fmt::Display for AttributedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::StyleKind;
    use pretty_assertions::assert_eq;

    fn added(author: usize) -> Attribute {
        Attribute::addition(author, None, ChangeFlags::empty())
    }

    fn deleted(flags: ChangeFlags) -> Attribute {
        Attribute::deletion(0, None, flags | ChangeFlags::DELETION)
    }

    fn kinds(text: &AttributedText) -> Vec<(usize, usize, StyleKind)> {
        text.runs()
            .map(|(r, a)| (r.start, r.end, a.kind))
            .collect()
    }

    #[test]
    fn insert_splits_runs() {
        let mut text = AttributedText::from_text("abcd");
        text.insert(2, "XY", added(1)).unwrap();
        assert_eq!(text.text(), "abXYcd");
        assert_eq!(
            kinds(&text),
            vec![
                (0, 2, StyleKind::None),
                (2, 4, StyleKind::Addition),
                (4, 6, StyleKind::None),
            ]
        );
    }

    #[test]
    fn insert_at_end_and_into_empty() {
        let mut text = AttributedText::new();
        text.insert(0, "é", added(0)).unwrap();
        text.insert(1, "!", added(0)).unwrap();
        assert_eq!(text.text(), "é!");
        assert_eq!(kinds(&text), vec![(0, 2, StyleKind::Addition)]);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut text = AttributedText::from_text("abc");
        assert_eq!(
            text.insert(4, "x", added(0)),
            Err(EditorError::PositionOutOfBounds {
                position: 4,
                length: 3
            })
        );
        assert!(text.remove(2, 2).unwrap_err().is_position_error());
        assert!(text.set_style(0, 4, added(0)).is_err());
        assert!(text.attribute_at(3).is_err());
        assert_eq!(text.text(), "abc");
    }

    #[test]
    fn remove_across_runs() {
        let mut text = AttributedText::from_text("ad");
        text.insert(1, "bc", added(1)).unwrap();
        text.remove(1, 2).unwrap();
        assert_eq!(text.text(), "ad");
        assert_eq!(kinds(&text), vec![(0, 2, StyleKind::None)]);
    }

    #[test]
    fn plain_only_styling_keeps_newer_styles() {
        let mut text = AttributedText::from_text("cat dogs");
        text.set_style(7, 1, added(2)).unwrap();
        text.set_style_if_plain(4, 4, added(1)).unwrap();
        let authors: Vec<(usize, usize, usize)> = text
            .runs()
            .filter(|(_, a)| a.is_addition())
            .map(|(r, a)| (r.start, r.end, a.author))
            .collect();
        assert_eq!(authors, vec![(4, 7, 1), (7, 8, 2)]);
    }

    #[test]
    fn hide_removes_deletions_and_clears_additions() {
        let mut text = AttributedText::from_text("one three");
        text.insert(4, "two ", deleted(ChangeFlags::COMMENT)).unwrap();
        text.insert(0, "zero ", deleted(ChangeFlags::empty())).unwrap();
        text.set_style(0, 5, deleted(ChangeFlags::empty())).unwrap();
        text.set_style(14, 4, Attribute::addition(0, None, ChangeFlags::COMMENT))
            .unwrap();

        text.hide(ChangeFlags::COMMENT);
        assert_eq!(text.text(), "zero one three");
        assert!(text.is_deletion(0).unwrap());
        assert!(text.runs().all(|(_, a)| !a.flags.contains(ChangeFlags::COMMENT)));
        assert!(!text.is_addition(9).unwrap());

        text.hide(ChangeFlags::DELETION);
        assert_eq!(text.text(), "one three");
        assert!(text.chunks().is_empty());
    }

    #[test]
    fn display_matches_text() {
        let text = AttributedText::from("x \\emph{y}");
        assert_eq!(text.to_string(), text.text());
        assert_eq!(text.slice(2, 7).unwrap(), "\\emph");
        assert!(text.slice(5, 2).is_err());
    }
}
