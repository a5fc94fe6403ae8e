//! Hunk extraction over two lexeme lists
//!
//! Lexemes are reduced to interned comparison keys and run through Myers'
//! algorithm. Consecutive non-equal operations are merged into one [`Hunk`].

use ahash::AHashMap;
use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::tokenizer::{Lexeme, TokenType};
use crate::utils::{IndexLength, IndexPair};

/// A maximal region where the two lexeme lists differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    /// First differing index in the old and the new list
    pub origin: IndexPair,
    /// Number of old lexemes removed
    pub deleted: usize,
    /// Number of new lexemes inserted
    pub inserted: usize,
}

impl Hunk {
    /// Create a hunk
    #[must_use]
    pub const fn new(old: usize, new: usize, deleted: usize, inserted: usize) -> Self {
        Self {
            origin: IndexPair::new(old, new),
            deleted,
            inserted,
        }
    }

    /// Removed lexemes as a run of old indices
    #[must_use]
    pub const fn old_run(&self) -> IndexLength {
        IndexLength::new(self.origin.old, self.deleted)
    }

    /// Inserted lexemes as a run of new indices
    #[must_use]
    pub const fn new_run(&self) -> IndexLength {
        IndexLength::new(self.origin.new, self.inserted)
    }

    /// Check if the hunk both removes and inserts lexemes
    #[must_use]
    pub const fn is_replacement(&self) -> bool {
        self.deleted > 0 && self.inserted > 0
    }

    /// Check if the hunk changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deleted == 0 && self.inserted == 0
    }
}

/// Map both lexeme lists onto shared integer ids
///
/// Two lexemes get the same id exactly when their comparison keys match.
fn intern<'a>(old: &[Lexeme<'a>], new: &[Lexeme<'a>]) -> (Vec<u32>, Vec<u32>) {
    let mut table: AHashMap<(TokenType, &'a str), u32> = AHashMap::new();
    let mut id_of = |lexeme: &Lexeme<'a>| {
        let next = u32::try_from(table.len()).unwrap_or(u32::MAX);
        *table.entry(lexeme.comparison_key()).or_insert(next)
    };
    let old_ids = old.iter().map(&mut id_of).collect();
    let new_ids = new.iter().map(&mut id_of).collect();
    (old_ids, new_ids)
}

/// Compute the hunks that turn `old` into `new`, front to back
#[must_use]
pub fn compute_hunks(old: &[Lexeme<'_>], new: &[Lexeme<'_>]) -> Vec<Hunk> {
    let (old_ids, new_ids) = intern(old, new);
    let ops = capture_diff_slices(Algorithm::Myers, &old_ids, &new_ids);

    let mut hunks = Vec::new();
    let mut pending: Option<Hunk> = None;

    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            if let Some(hunk) = pending.take() {
                hunks.push(hunk);
            }
            continue;
        }

        let hunk = pending.get_or_insert(Hunk::new(old_range.start, new_range.start, 0, 0));
        hunk.deleted += old_range.len();
        hunk.inserted += new_range.len();
    }
    if let Some(hunk) = pending {
        hunks.push(hunk);
    }

    hunks.retain(|h| !h.is_empty());
    hunks
}
