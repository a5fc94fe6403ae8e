//! Small-change detection
//!
//! A replacement hunk often hides a typo fix: one word swapped for an almost
//! identical one. Such a pair is diffed character by character instead of
//! being shown as a whole-word deletion plus addition.

use similar::{capture_diff_slices, Algorithm, DiffOp};

use super::hunks::Hunk;
use crate::tokenizer::Lexeme;

/// A qualifying pair inside a replacement hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallPair {
    /// Offset of the old lexeme within the hunk's deleted run
    pub old_offset: usize,
    /// Offset of the new lexeme within the hunk's inserted run
    pub new_offset: usize,
}

impl SmallPair {
    /// Sub-hunks before and after the pair, skipping empty ones
    #[must_use]
    pub fn split(self, hunk: Hunk) -> (Option<Hunk>, Option<Hunk>) {
        let before = Hunk::new(
            hunk.origin.old,
            hunk.origin.new,
            self.old_offset,
            self.new_offset,
        );
        let after = Hunk::new(
            hunk.origin.old + self.old_offset + 1,
            hunk.origin.new + self.new_offset + 1,
            hunk.deleted - self.old_offset - 1,
            hunk.inserted - self.new_offset - 1,
        );
        (
            (!before.is_empty()).then_some(before),
            (!after.is_empty()).then_some(after),
        )
    }
}

/// Check if two lexemes are close enough to be diffed by character
///
/// Both must carry visible text and share a type, and their edit distance
/// must stay below both `threshold` and the length of the shorter one.
#[must_use]
pub fn is_small_edit(old: &Lexeme<'_>, new: &Lexeme<'_>, threshold: usize) -> bool {
    if old.is_blank() || new.is_blank() || old.token_type() != new.token_type() {
        return false;
    }
    let limit = threshold.min(old.len().min(new.len()));
    strsim::levenshtein(old.contents(), new.contents()) < limit
}

/// Find the first qualifying pair of a replacement hunk
///
/// Deleted lexemes are scanned in order, each against the inserted lexemes
/// in order.
#[must_use]
pub fn find_pair(
    old: &[Lexeme<'_>],
    new: &[Lexeme<'_>],
    hunk: Hunk,
    threshold: usize,
) -> Option<SmallPair> {
    let deleted = &old[hunk.old_run().indices()];
    let inserted = &new[hunk.new_run().indices()];

    deleted.iter().enumerate().find_map(|(old_offset, a)| {
        inserted
            .iter()
            .position(|b| is_small_edit(a, b, threshold))
            .map(|new_offset| SmallPair {
                old_offset,
                new_offset,
            })
    })
}

/// A character-level edit inside the new lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharEdit {
    /// Characters `[index, index + length)` of the new lexeme were added
    Added {
        /// Character index within the new lexeme
        index: usize,
        /// Number of added characters
        length: usize,
    },
    /// `text` was removed just before character `index` of the new lexeme
    Removed {
        /// Character index within the new lexeme
        index: usize,
        /// Removed characters
        text: String,
    },
}

/// Character-level edits turning `old` into `new`
#[must_use]
pub fn char_edits(old: &str, new: &str) -> Vec<CharEdit> {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let ops = capture_diff_slices(Algorithm::Myers, &old_chars, &new_chars);

    let removed = |index: usize, old_index: usize, old_len: usize| CharEdit::Removed {
        index,
        text: old_chars[old_index..old_index + old_len].iter().collect(),
    };

    let mut edits = Vec::new();
    for op in ops {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => edits.push(removed(new_index, old_index, old_len)),
            DiffOp::Insert {
                new_index, new_len, ..
            } => edits.push(CharEdit::Added {
                index: new_index,
                length: new_len,
            }),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                edits.push(removed(new_index, old_index, old_len));
                edits.push(CharEdit::Added {
                    index: new_index,
                    length: new_len,
                });
            }
        }
    }
    edits
}
