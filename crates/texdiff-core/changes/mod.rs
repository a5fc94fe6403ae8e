//! Change taxonomy produced by the lexical diff
//!
//! A [`Change`] is one edit between two revisions, expressed in terms of the
//! newer text: additions mark a range of it, deletions carry removed text to
//! be shown at a position in it. Changes are totally ordered by position,
//! then by the rank of their variant, then by creation sequence, so a change
//! list can be applied front to back with a running offset.
//!
//! # Example
//!
//! ```rust
//! use texdiff_core::changes::{Change, ChangeFlags, SequenceCounter};
//! use texdiff_core::IndexFlags;
//!
//! let mut sequence = SequenceCounter::new();
//! let added = Change::addition(
//!     4,
//!     9,
//!     vec![IndexFlags::new(0, ChangeFlags::empty())],
//!     sequence.advance(),
//! )?;
//! let removed = Change::deletion(4, vec![("old ".to_string(), ChangeFlags::DELETION)], sequence.advance())?;
//! assert!(added < removed);
//! # Ok::<(), texdiff_core::CoreError>(())
//! ```

use core::cmp::Ordering;

use crate::utils::{IndexFlags, PosRange};
use crate::Result;

pub mod flags;
pub mod variants;

pub use flags::ChangeFlags;
pub use variants::{Addition, Deletion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hands out monotonically increasing sequence numbers for one diff run
///
/// Each diff owns its counter; sequence numbers only break ties between
/// changes of the same run.
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter {
    /// Next number to hand out
    next: u64,
}

impl SequenceCounter {
    /// Create a counter starting at zero
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next sequence number
    pub fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// Number of sequence numbers handed out so far
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

/// Variant of a change, carrying its payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeKind {
    /// Lexemes present only in the newer text
    Addition(Addition),
    /// Lexemes present only in the older text
    Deletion(Deletion),
    /// Characters added inside a lexeme
    SmallAddition(Addition),
    /// Characters removed from inside a lexeme
    SmallDeletion(Deletion),
    /// Moved text; part of the ordering but never produced by the diff
    Translocation {
        /// Distance the text moved
        position_offset: isize,
    },
}

impl ChangeKind {
    /// Rank used as the second ordering key
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Addition(_) => 1,
            Self::Deletion(_) => 2,
            Self::SmallAddition(_) => 3,
            Self::SmallDeletion(_) => 4,
            Self::Translocation { .. } => 5,
        }
    }

    /// Short name for logs and text output
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Addition(_) => "addition",
            Self::Deletion(_) => "deletion",
            Self::SmallAddition(_) => "small addition",
            Self::SmallDeletion(_) => "small deletion",
            Self::Translocation { .. } => "translocation",
        }
    }

    /// Addition payload of either addition variant
    #[must_use]
    pub const fn as_addition(&self) -> Option<&Addition> {
        match self {
            Self::Addition(a) | Self::SmallAddition(a) => Some(a),
            _ => None,
        }
    }

    /// Deletion payload of either deletion variant
    #[must_use]
    pub const fn as_deletion(&self) -> Option<&Deletion> {
        match self {
            Self::Deletion(d) | Self::SmallDeletion(d) => Some(d),
            _ => None,
        }
    }

    /// Check if this variant came from the character-level pass
    #[must_use]
    pub const fn is_small(&self) -> bool {
        matches!(self, Self::SmallAddition(_) | Self::SmallDeletion(_))
    }
}

/// One edit between two revisions
///
/// Changes compare by their place in the total order only:
/// `(start_position, rank, sequence)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Change {
    /// Offset in the newer text where the change applies
    start_position: usize,
    /// Change lies before the preamble boundary
    in_preamble: bool,
    /// Change starts inside a comment
    in_comment: bool,
    /// Change starts with a markup command
    is_command: bool,
    /// Creation order within the diff run
    sequence: u64,
    /// Variant payload
    kind: ChangeKind,
}

impl Change {
    /// Build a change, taking the context flags from the leading sub-span
    ///
    /// `in_preamble`, `in_comment` and `is_command` mirror the `PREAMBLE`,
    /// `COMMENT` and `COMMAND` bits of the first sub-span's flags.
    #[must_use]
    pub fn new(start_position: usize, kind: ChangeKind, sequence: u64) -> Self {
        let leading = match &kind {
            ChangeKind::Addition(a) | ChangeKind::SmallAddition(a) => a.leading_flags(),
            ChangeKind::Deletion(d) | ChangeKind::SmallDeletion(d) => d.leading_flags(),
            ChangeKind::Translocation { .. } => ChangeFlags::empty(),
        };
        Self {
            start_position,
            in_preamble: leading.contains(ChangeFlags::PREAMBLE),
            in_comment: leading.contains(ChangeFlags::COMMENT),
            is_command: leading.contains(ChangeFlags::COMMAND),
            sequence,
            kind,
        }
    }

    /// Build an ordinary addition covering `[start, end)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidChange`] if the range or sub-spans are
    /// inconsistent.
    pub fn addition(
        start: usize,
        end: usize,
        flagged_subspans: Vec<IndexFlags>,
        sequence: u64,
    ) -> Result<Self> {
        let addition = Addition::new(start, end, flagged_subspans)?;
        Ok(Self::new(start, ChangeKind::Addition(addition), sequence))
    }

    /// Build an ordinary deletion shown at `start`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidChange`] if the fragments are empty.
    pub fn deletion(
        start: usize,
        fragments: Vec<(String, ChangeFlags)>,
        sequence: u64,
    ) -> Result<Self> {
        let deletion = Deletion::from_fragments(start, fragments)?;
        Ok(Self::new(start, ChangeKind::Deletion(deletion), sequence))
    }

    /// Build a character-level addition covering `[start, end)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidChange`] if `end < start`.
    pub fn small_addition(start: usize, end: usize, flags: ChangeFlags, sequence: u64) -> Result<Self> {
        let addition = Addition::new(start, end, vec![IndexFlags::new(0, flags)])?;
        Ok(Self::new(start, ChangeKind::SmallAddition(addition), sequence))
    }

    /// Build a character-level deletion shown at `start`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidChange`] if `text` is empty.
    pub fn small_deletion(start: usize, text: &str, flags: ChangeFlags, sequence: u64) -> Result<Self> {
        let deletion = Deletion::new(start, text.to_string(), vec![(text.to_string(), flags)])?;
        Ok(Self::new(start, ChangeKind::SmallDeletion(deletion), sequence))
    }

    /// Build a translocation marker
    #[must_use]
    pub fn translocation(start: usize, position_offset: isize, sequence: u64) -> Self {
        Self::new(start, ChangeKind::Translocation { position_offset }, sequence)
    }

    /// Offset in the newer text where the change applies
    #[must_use]
    pub const fn start_position(&self) -> usize {
        self.start_position
    }

    /// Change lies before the preamble boundary
    #[must_use]
    pub const fn in_preamble(&self) -> bool {
        self.in_preamble
    }

    /// Change starts inside a comment
    #[must_use]
    pub const fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Change starts with a markup command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        self.is_command
    }

    /// Creation order within the diff run
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Variant payload
    #[must_use]
    pub const fn kind(&self) -> &ChangeKind {
        &self.kind
    }

    /// Range of the newer text covered by an addition
    ///
    /// Deletions and translocations cover nothing of the newer text and
    /// report an empty range at their start.
    #[must_use]
    pub fn range(&self) -> PosRange {
        self.kind.as_addition().map_or_else(
            || PosRange::empty(self.start_position),
            |a| PosRange::new(self.start_position, a.end_position()),
        )
    }

    /// Flags summarising the change as a whole
    #[must_use]
    pub fn flags(&self) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();
        flags.set(ChangeFlags::PREAMBLE, self.in_preamble);
        flags.set(ChangeFlags::COMMENT, self.in_comment);
        flags.set(ChangeFlags::COMMAND, self.is_command);
        flags.set(ChangeFlags::DELETION, self.kind.as_deletion().is_some());
        flags.set(ChangeFlags::SMALL, self.kind.is_small());
        flags
    }

    /// Key of the total order
    const fn order_key(&self) -> (usize, u8, u64) {
        (self.start_position, self.kind.rank(), self.sequence)
    }
}

impl PartialEq for Change {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for Change {}

impl PartialOrd for Change {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Change {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}
