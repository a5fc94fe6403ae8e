//! Small immutable value types for sub-spans and hunks
//!
//! - [`PosRange`]: a half-open character range in a text
//! - [`IndexPair`]: a pair of indices into the old and new lexeme lists
//! - [`IndexLength`]: a contiguous run of lexemes (start index plus count)
//! - [`IndexFlags`]: a character offset tagged with the flags that apply from it on

use crate::changes::ChangeFlags;
use core::cmp::{max, min};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A range in a text represented by start and end character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PosRange {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl PosRange {
    /// Create a new range
    ///
    /// Automatically normalizes so start <= end
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a range from a start offset and a length
    #[must_use]
    pub const fn with_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Create an empty range at an offset
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Check if range is empty (start == end)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the range in characters
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if range contains an offset
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if this range overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Get the union of two ranges (smallest range containing both)
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: min(self.start, other.start),
            end: max(self.end, other.end),
        }
    }

    /// Get the intersection of two ranges if they overlap
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = max(self.start, other.start);
        let end = min(self.end, other.end);
        (start < end).then_some(Self { start, end })
    }

    /// Shift both ends by `delta` characters
    #[must_use]
    pub const fn shifted(&self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl fmt::Display for PosRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

impl From<core::ops::Range<usize>> for PosRange {
    fn from(range: core::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Indices into the old and the new lexeme list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexPair {
    /// Index into the old (left) sequence
    pub old: usize,
    /// Index into the new (right) sequence
    pub new: usize,
}

impl IndexPair {
    /// Create a new index pair
    #[must_use]
    pub const fn new(old: usize, new: usize) -> Self {
        Self { old, new }
    }
}

/// A contiguous run of `length` items starting at `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexLength {
    /// First index of the run
    pub index: usize,
    /// Number of items in the run
    pub length: usize,
}

impl IndexLength {
    /// Create a new run
    #[must_use]
    pub const fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// One past the last index of the run
    #[must_use]
    pub const fn end(&self) -> usize {
        self.index + self.length
    }

    /// Check if the run holds no items
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The indices covered by the run
    #[must_use]
    pub const fn indices(&self) -> core::ops::Range<usize> {
        self.index..self.index + self.length
    }
}

/// A character offset tagged with the flags that hold from it onwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexFlags {
    /// Offset relative to the start of the owning change
    pub index: usize,
    /// Flags for the sub-span starting at `index`
    pub flags: ChangeFlags,
}

impl IndexFlags {
    /// Create a new flagged offset
    #[must_use]
    pub const fn new(index: usize, flags: ChangeFlags) -> Self {
        Self { index, flags }
    }
}
