//! Payloads of the addition and deletion change variants

use super::ChangeFlags;
use crate::utils::{char_len, CoreError, IndexFlags};
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text present in the newer revision only
///
/// Covers `[start_position, end_position)` of the newer text. The flagged
/// sub-spans partition that range: offsets are relative to the start of the
/// change, the first is 0 and they ascend strictly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Addition {
    /// End offset (exclusive) in the newer text
    end_position: usize,
    /// Relative offsets where the flags change
    flagged_subspans: Vec<IndexFlags>,
}

impl Addition {
    /// Build an addition ending at `end_position`, validated against `start`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidChange`] if the end precedes the start or
    /// the sub-spans do not partition the range.
    pub fn new(start: usize, end_position: usize, flagged_subspans: Vec<IndexFlags>) -> Result<Self> {
        if end_position < start {
            return Err(CoreError::invalid_change(
                start,
                format!("addition ends at {end_position} before it starts"),
            ));
        }
        match flagged_subspans.first() {
            Some(first) if first.index == 0 => {}
            _ => {
                return Err(CoreError::invalid_change(
                    start,
                    "addition sub-spans must start at offset 0",
                ))
            }
        }

        let length = end_position - start;
        for pair in flagged_subspans.windows(2) {
            if pair[1].index <= pair[0].index {
                return Err(CoreError::invalid_change(
                    start,
                    "addition sub-span offsets must ascend",
                ));
            }
        }
        if flagged_subspans.len() > 1
            && flagged_subspans.last().is_some_and(|last| last.index >= length)
        {
            return Err(CoreError::invalid_change(
                start,
                "addition sub-span lies past the end of the change",
            ));
        }

        Ok(Self {
            end_position,
            flagged_subspans,
        })
    }

    /// End offset (exclusive) in the newer text
    #[must_use]
    pub const fn end_position(&self) -> usize {
        self.end_position
    }

    /// Relative offsets where the flags change
    #[must_use]
    pub fn flagged_subspans(&self) -> &[IndexFlags] {
        &self.flagged_subspans
    }

    /// Flags of the first sub-span
    #[must_use]
    pub fn leading_flags(&self) -> ChangeFlags {
        self.flagged_subspans
            .first()
            .map_or_else(ChangeFlags::empty, |s| s.flags)
    }

    /// Iterate over `(relative_start, relative_end, flags)` for each sub-span
    pub fn spans(&self, start: usize) -> impl Iterator<Item = (usize, usize, ChangeFlags)> + '_ {
        let length = self.end_position - start;
        self.flagged_subspans.iter().enumerate().map(move |(i, span)| {
            let end = self
                .flagged_subspans
                .get(i + 1)
                .map_or(length, |next| next.index);
            (span.index, end, span.flags)
        })
    }
}

/// Text present in the older revision only
///
/// The fragments of the flagged sub-spans concatenate to exactly `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deletion {
    /// Removed text, never empty
    text: String,
    /// Fragments of `text` with their flags
    flagged_subspans: Vec<(String, ChangeFlags)>,
}

impl Deletion {
    /// Build a deletion from its flagged fragments
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidChange`] if the text is empty, a fragment
    /// is empty or the fragments do not concatenate to `text`.
    pub fn new(
        start: usize,
        text: String,
        flagged_subspans: Vec<(String, ChangeFlags)>,
    ) -> Result<Self> {
        if text.is_empty() {
            return Err(CoreError::invalid_change(start, "deletion text is empty"));
        }
        if flagged_subspans.iter().any(|(fragment, _)| fragment.is_empty()) {
            return Err(CoreError::invalid_change(start, "deletion fragment is empty"));
        }
        let joined: String = flagged_subspans.iter().map(|(f, _)| f.as_str()).collect();
        if joined != text {
            return Err(CoreError::invalid_change(
                start,
                format!("deletion fragments {joined:?} do not spell {text:?}"),
            ));
        }

        Ok(Self {
            text,
            flagged_subspans,
        })
    }

    /// Build a deletion from fragments, joining them into the text
    ///
    /// # Errors
    ///
    /// Same as [`Deletion::new`].
    pub fn from_fragments(start: usize, flagged_subspans: Vec<(String, ChangeFlags)>) -> Result<Self> {
        let text = flagged_subspans.iter().map(|(f, _)| f.as_str()).collect();
        Self::new(start, text, flagged_subspans)
    }

    /// Removed text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the removed text in characters
    #[must_use]
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Fragments of the text with their flags
    #[must_use]
    pub fn flagged_subspans(&self) -> &[(String, ChangeFlags)] {
        &self.flagged_subspans
    }

    /// Flags of the first fragment
    #[must_use]
    pub fn leading_flags(&self) -> ChangeFlags {
        self.flagged_subspans
            .first()
            .map_or_else(ChangeFlags::empty, |(_, flags)| *flags)
    }
}
