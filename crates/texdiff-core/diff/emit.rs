//! Turning hunks into changes
//!
//! One [`ChangeBuilder`] lives for one diff run. It owns the sequence
//! counter and the ordered change set, and knows the whitespace rules that
//! decide how much of the text around a hunk a change carries.

use std::collections::{BTreeMap, BTreeSet};

use super::hunks::Hunk;
use super::small::{char_edits, CharEdit};
use crate::changes::{Change, ChangeFlags, SequenceCounter};
use crate::tokenizer::{Lexeme, TokenType};
use crate::utils::{IndexFlags, IndexLength, IndexedText};
use crate::Result;

/// Collects the changes of one diff run
#[derive(Debug)]
pub struct ChangeBuilder<'s, 'a> {
    /// Lexemes of the older text
    old: &'s [Lexeme<'a>],
    /// Lexemes of the newer text
    new: &'s [Lexeme<'a>],
    /// Older text, for slicing deleted ranges
    old_text: IndexedText<'a>,
    /// Position of the preamble boundary in the newer text
    boundary: Option<usize>,
    /// Sequence numbers for this run
    sequence: SequenceCounter,
    /// Changes in total order
    changes: BTreeSet<Change>,
    /// Character removals at the very end of a new lexeme, by position
    ///
    /// A deletion emitted later at the same position absorbs the removal as
    /// its leading fragment, since the removed suffix precedes the deleted
    /// lexemes in the older text.
    trailing: BTreeMap<usize, (String, ChangeFlags)>,
}

impl<'s, 'a> ChangeBuilder<'s, 'a> {
    /// Create a builder for one pair of texts
    #[must_use]
    pub fn new(old: &'s [Lexeme<'a>], new: &'s [Lexeme<'a>], old_text: &'a str) -> Self {
        let boundary = new.iter().find(|l| l.preamble_seen()).map(Lexeme::pos);
        Self {
            old,
            new,
            old_text: IndexedText::new(old_text),
            boundary,
            sequence: SequenceCounter::new(),
            changes: BTreeSet::new(),
            trailing: BTreeMap::new(),
        }
    }

    /// The collected changes in total order
    ///
    /// Trailing removals that no deletion absorbed become small deletions.
    ///
    /// # Errors
    ///
    /// Returns an error if a left-over removal fails validation.
    pub fn finish(mut self) -> Result<Vec<Change>> {
        for (position, (text, flags)) in std::mem::take(&mut self.trailing) {
            let sequence = self.sequence.advance();
            self.insert(Change::small_deletion(position, &text, flags, sequence)?);
        }
        Ok(self.changes.into_iter().collect())
    }

    /// Flags of one lexeme inside a hunk
    fn lexeme_flags(lexeme: &Lexeme<'_>, in_preamble: bool) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();
        flags.set(ChangeFlags::PREAMBLE, in_preamble);
        flags.set(ChangeFlags::COMMENT, lexeme.is_comment());
        flags.set(ChangeFlags::COMMAND, lexeme.is_command());
        flags
    }

    /// Split a run of lexemes into maximal runs of one class
    fn class_runs(lexemes: &[Lexeme<'_>], run: IndexLength) -> Vec<IndexLength> {
        let mut runs: Vec<IndexLength> = Vec::new();
        for index in run.indices() {
            let class = lexemes[index].is_command_or_comment();
            match runs.last_mut() {
                Some(last) if lexemes[last.index].is_command_or_comment() == class => {
                    last.length += 1;
                }
                _ => runs.push(IndexLength::new(index, 1)),
            }
        }
        runs
    }

    /// Add a change to the ordered set
    fn insert(&mut self, change: Change) {
        self.changes.insert(change);
    }

    /// Emit the deletions and additions of an ordinary hunk
    ///
    /// # Errors
    ///
    /// Returns an error if a change fails validation, which indicates
    /// inconsistent lexeme positions.
    pub fn emit_hunk(&mut self, hunk: Hunk) -> Result<()> {
        let ns = hunk.origin.new;
        let inserted_end = if hunk.inserted > 0 {
            self.new[ns + hunk.inserted - 1].end()
        } else {
            self.new[ns].pos()
        };
        let in_preamble = self.boundary.is_some_and(|b| inserted_end <= b);

        log::trace!(
            "hunk old {}+{} new {}+{}{}",
            hunk.origin.old,
            hunk.deleted,
            ns,
            hunk.inserted,
            if in_preamble { " (preamble)" } else { "" }
        );

        if hunk.deleted > 0 {
            self.emit_deletions(hunk, in_preamble)?;
        }
        if hunk.inserted > 0 {
            self.emit_additions(hunk, in_preamble)?;
        }
        Ok(())
    }

    /// One deletion per class run of the removed lexemes, shown after the
    /// last kept lexeme
    fn emit_deletions(&mut self, hunk: Hunk, in_preamble: bool) -> Result<()> {
        let os = hunk.origin.old;
        let ns = hunk.origin.new;
        let position = self.new[ns - 1].end();
        let previous = self.old[os - 1];
        let next_start = self.old[os + hunk.deleted].pos();
        // Removed text must stay separated from its neighbours once shown.
        let take_trailing_gap =
            previous.end() == self.old[os].pos() || position == self.new[ns].pos();

        let runs = Self::class_runs(self.old, hunk.old_run());
        let mut cursor = previous.end();

        for (k, run) in runs.iter().enumerate() {
            let is_last = k + 1 == runs.len();
            let end = if is_last && take_trailing_gap {
                next_start
            } else {
                self.old[run.end() - 1].end()
            };

            let mut fragments: Vec<(String, ChangeFlags)> = Vec::new();
            let mut fragment_start = cursor;
            let mut current = None;
            for index in run.indices() {
                let lexeme = &self.old[index];
                let flags = Self::lexeme_flags(lexeme, in_preamble) | ChangeFlags::DELETION;
                match current {
                    Some(previous_flags) if previous_flags != flags => {
                        let fragment = self.old_text.slice(fragment_start, lexeme.pos())?;
                        fragments.push((fragment.to_string(), previous_flags));
                        fragment_start = lexeme.pos();
                        current = Some(flags);
                    }
                    Some(_) => {}
                    None => current = Some(flags),
                }
            }
            if let Some(flags) = current {
                fragments.push((self.old_text.slice(fragment_start, end)?.to_string(), flags));
            }
            if k == 0 {
                if let Some(removed) = self.trailing.remove(&position) {
                    log::trace!("deletion at {position} absorbs removed suffix {:?}", removed.0);
                    fragments.insert(0, removed);
                }
            }

            let sequence = self.sequence.advance();
            self.insert(Change::deletion(position, fragments, sequence)?);
            cursor = end;
        }
        Ok(())
    }

    /// One addition per class run of the inserted lexemes
    fn emit_additions(&mut self, hunk: Hunk, in_preamble: bool) -> Result<()> {
        let ns = hunk.origin.new;
        let previous = self.new[ns - 1];
        let next_start = self.new[ns + hunk.inserted].pos();
        let take_trailing_gap = previous.end() != self.new[ns].pos()
            || previous.token_type() == TokenType::StartOfFile;

        let runs = Self::class_runs(self.new, hunk.new_run());
        for (k, run) in runs.iter().enumerate() {
            let start = self.new[run.index].pos();
            let end = match runs.get(k + 1) {
                Some(next) => self.new[next.index].pos(),
                None if take_trailing_gap => next_start,
                None => self.new[run.end() - 1].end(),
            };

            let mut subspans: Vec<IndexFlags> = Vec::new();
            for index in run.indices() {
                let lexeme = &self.new[index];
                let flags = Self::lexeme_flags(lexeme, in_preamble);
                if subspans.last().map_or(true, |s| s.flags != flags) {
                    subspans.push(IndexFlags::new(lexeme.pos() - start, flags));
                }
            }

            let sequence = self.sequence.advance();
            self.insert(Change::addition(start, end, subspans, sequence)?);
        }
        Ok(())
    }

    /// Emit the character-level changes between two similar lexemes
    ///
    /// # Errors
    ///
    /// Returns an error if a change fails validation.
    pub fn emit_small(&mut self, old: &Lexeme<'_>, new: &Lexeme<'_>) -> Result<()> {
        let mut flags = ChangeFlags::SMALL;
        flags.set(
            ChangeFlags::PREAMBLE,
            self.boundary.is_some() && !new.preamble_seen(),
        );
        flags.set(ChangeFlags::COMMENT, new.is_comment());
        flags.set(ChangeFlags::COMMAND, new.is_command());

        log::trace!("small change {:?} -> {:?}", old.contents(), new.contents());

        for edit in char_edits(old.contents(), new.contents()) {
            let change = match edit {
                CharEdit::Added { index, length } => {
                    let start = new.pos() + index;
                    Change::small_addition(start, start + length, flags, self.sequence.advance())?
                }
                CharEdit::Removed { index, text } if new.pos() + index == new.end() => {
                    self.trailing
                        .insert(new.end(), (text, flags | ChangeFlags::DELETION));
                    continue;
                }
                CharEdit::Removed { index, text } => Change::small_deletion(
                    new.pos() + index,
                    &text,
                    flags | ChangeFlags::DELETION,
                    self.sequence.advance(),
                )?,
            };
            self.insert(change);
        }
        Ok(())
    }
}
