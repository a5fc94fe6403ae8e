//! Lexical diff engine
//!
//! Compares two texts lexeme by lexeme and returns the ordered list of
//! [`Change`]s that turns the older text into the newer one.
//!
//! # Pipeline
//!
//! 1. Both texts are tokenized and reduced to comparison keys
//! 2. A minimal edit script over the keys is grouped into hunks
//! 3. Replacement hunks are searched for a near-identical lexeme pair, which
//!    is diffed by character; the remainder is queued again
//! 4. Every other hunk becomes deletions and additions, split so that
//!    commands and comments never share a change with prose
//!
//! # Example
//!
//! ```rust
//! use texdiff_core::{ChangeKind, DiffConfig, LexicalDiff};
//!
//! let engine = LexicalDiff::new(DiffConfig::default());
//! let changes = engine.diff("The cat sat.", "The car sat.")?;
//! assert!(changes.iter().all(|c| c.kind().is_small()));
//!
//! let engine = LexicalDiff::new(DiffConfig::default().with_small_changes(false));
//! let changes = engine.diff("The cat sat.", "The car sat.")?;
//! assert!(changes.iter().any(|c| matches!(c.kind(), ChangeKind::Addition(_))));
//! # Ok::<(), texdiff_core::CoreError>(())
//! ```

use std::collections::VecDeque;
use std::io::Read;

use crate::changes::Change;
use crate::tokenizer::tokenize;
use crate::utils::CoreError;
use crate::Result;

pub mod emit;
pub mod hunks;
pub mod small;

pub use emit::ChangeBuilder;
pub use hunks::{compute_hunks, Hunk};
pub use small::{char_edits, find_pair, is_small_edit, CharEdit, SmallPair};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default edit distance below which two lexemes count as a small change
pub const DEFAULT_SMALL_CHANGE_THRESHOLD: usize = 3;

/// Configuration for the lexical diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    /// Detect typo-sized edits and report them by character
    pub small_changes: bool,

    /// Edit distance a small change must stay below
    pub small_change_threshold: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            small_changes: true,
            small_change_threshold: DEFAULT_SMALL_CHANGE_THRESHOLD,
        }
    }
}

impl DiffConfig {
    /// Enable or disable small-change detection
    #[must_use]
    pub const fn with_small_changes(mut self, enabled: bool) -> Self {
        self.small_changes = enabled;
        self
    }

    /// Set the small-change edit distance threshold
    #[must_use]
    pub const fn with_threshold(mut self, threshold: usize) -> Self {
        self.small_change_threshold = threshold;
        self
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if small changes are enabled with a
    /// threshold of zero.
    pub fn validate(&self) -> Result<()> {
        if self.small_changes && self.small_change_threshold == 0 {
            return Err(CoreError::config(
                "small change threshold must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Lexical diff engine
#[derive(Debug, Clone, Default)]
pub struct LexicalDiff {
    /// Engine configuration
    config: DiffConfig,
}

impl LexicalDiff {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compute the ordered changes from `old` to `new`
    ///
    /// Positions refer to character offsets in `new`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or tokenization
    /// fails. Invalid-change errors indicate a defect in the engine.
    pub fn diff(&self, old: &str, new: &str) -> Result<Vec<Change>> {
        self.config.validate()?;

        let old_lexemes = tokenize(old, false)?;
        let new_lexemes = tokenize(new, false)?;
        let hunks = compute_hunks(&old_lexemes, &new_lexemes);

        log::debug!(
            "{} old and {} new lexemes, {} hunks",
            old_lexemes.len(),
            new_lexemes.len(),
            hunks.len()
        );
        if hunks.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = ChangeBuilder::new(&old_lexemes, &new_lexemes, old);
        let mut queue: VecDeque<Hunk> = hunks.into();
        let mut small_hits = 0usize;

        while let Some(hunk) = queue.pop_front() {
            if self.config.small_changes && hunk.is_replacement() {
                let threshold = self.config.small_change_threshold;
                if let Some(pair) = find_pair(&old_lexemes, &new_lexemes, hunk, threshold) {
                    let a = &old_lexemes[hunk.origin.old + pair.old_offset];
                    let b = &new_lexemes[hunk.origin.new + pair.new_offset];
                    builder.emit_small(a, b)?;
                    small_hits += 1;

                    let (before, after) = pair.split(hunk);
                    if let Some(after) = after {
                        queue.push_front(after);
                    }
                    if let Some(before) = before {
                        queue.push_front(before);
                    }
                    continue;
                }
            }
            builder.emit_hunk(hunk)?;
        }

        let changes = builder.finish()?;
        log::debug!("{} changes ({small_hits} small pairs)", changes.len());
        Ok(changes)
    }

    /// Read both sources to the end and diff them
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if either source cannot be read, otherwise
    /// the errors of [`LexicalDiff::diff`].
    pub fn diff_readers<R1: Read, R2: Read>(&self, mut old: R1, mut new: R2) -> Result<Vec<Change>> {
        let mut old_text = String::new();
        old.read_to_string(&mut old_text)?;
        let mut new_text = String::new();
        new.read_to_string(&mut new_text)?;
        self.diff(&old_text, &new_text)
    }
}

/// Diff two texts with the default configuration
///
/// # Errors
///
/// See [`LexicalDiff::diff`].
pub fn diff(old: &str, new: &str) -> Result<Vec<Change>> {
    LexicalDiff::default().diff(old, new)
}

/// Diff two readable sources with the default configuration
///
/// # Errors
///
/// See [`LexicalDiff::diff_readers`].
pub fn diff_readers<R1: Read, R2: Read>(old: R1, new: R2) -> Result<Vec<Change>> {
    LexicalDiff::default().diff_readers(old, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::{ChangeFlags, ChangeKind};
    use pretty_assertions::assert_eq;

    fn additions(changes: &[Change], new: &str) -> Vec<String> {
        changes
            .iter()
            .filter_map(|c| {
                c.kind().as_addition().map(|a| {
                    new.chars()
                        .skip(c.start_position())
                        .take(a.end_position() - c.start_position())
                        .collect()
                })
            })
            .collect()
    }

    fn deletions(changes: &[Change]) -> Vec<(usize, String)> {
        changes
            .iter()
            .filter_map(|c| {
                c.kind()
                    .as_deletion()
                    .map(|d| (c.start_position(), d.text().to_string()))
            })
            .collect()
    }

    #[test]
    fn identical_texts() {
        assert!(diff("same text", "same text").unwrap().is_empty());
        assert!(diff("", "").unwrap().is_empty());
    }

    #[test]
    fn insertion_takes_following_space() {
        let new = "Hello brave world";
        let changes = diff("Hello world", new).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].start_position(), 6);
        assert_eq!(additions(&changes, new), vec!["brave ".to_string()]);
    }

    #[test]
    fn deletion_takes_leading_space() {
        let changes = diff("a b c", "a c").unwrap();
        assert_eq!(deletions(&changes), vec![(1, " b".to_string())]);
    }

    #[test]
    fn deletion_at_head_takes_trailing_space() {
        let changes = diff("foo bar", "bar").unwrap();
        assert_eq!(deletions(&changes), vec![(0, "foo ".to_string())]);
    }

    #[test]
    fn addition_at_head_takes_trailing_space() {
        let new = "foo bar";
        let changes = diff("bar", new).unwrap();
        assert_eq!(additions(&changes, new), vec!["foo ".to_string()]);
    }

    #[test]
    fn addition_without_gap_stays_tight() {
        let new = "a!.";
        let changes = diff("a.", new).unwrap();
        assert_eq!(additions(&changes, new), vec!["!".to_string()]);
        assert_eq!(changes[0].start_position(), 1);
    }

    #[test]
    fn replacement_orders_deletion_before_addition() {
        let new = "a x c";
        let changes = diff("a b c", new).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(deletions(&changes), vec![(1, " b".to_string())]);
        assert_eq!(additions(&changes, new), vec!["x ".to_string()]);
        assert!(changes[0] < changes[1]);
    }

    #[test]
    fn typo_fix_is_small() {
        let changes = diff("the cat", "the car").unwrap();
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0].kind(), ChangeKind::SmallAddition(_)));
        assert!(matches!(changes[1].kind(), ChangeKind::SmallDeletion(_)));
        assert_eq!(changes[0].start_position(), 6);
        assert_eq!(deletions(&changes), vec![(6, "t".to_string())]);
    }

    #[test]
    fn small_change_splits_hunk() {
        let new = "one big car two";
        let changes = diff("one cat two", new).unwrap();
        let small: Vec<&Change> = changes.iter().filter(|c| c.kind().is_small()).collect();
        assert_eq!(small.len(), 2);
        assert_eq!(additions(&changes, new), vec!["big ".to_string(), "r".to_string()]);
    }

    #[test]
    fn commands_split_from_prose() {
        let new = "x \\emph text y";
        let changes = diff("x y", new).unwrap();
        assert_eq!(
            additions(&changes, new),
            vec!["\\emph ".to_string(), "text ".to_string()]
        );
        assert!(changes[0].is_command());
        assert!(!changes[1].is_command());
    }

    #[test]
    fn comment_changes_are_flagged() {
        let changes = diff("text\n", "text % note\n").unwrap();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].in_comment());
        assert!(changes[0].flags().contains(ChangeFlags::COMMENT));
    }

    #[test]
    fn preamble_changes_are_flagged() {
        let old = "\\documentclass{article}\n\\begin{document}\nBody\n";
        let new = "\\documentclass{article}\n\\usepackage{x}\n\\begin{document}\nBody text\n";
        let changes = diff(old, new).unwrap();
        let in_preamble: Vec<bool> = changes.iter().map(Change::in_preamble).collect();
        assert!(in_preamble.contains(&true));
        assert!(in_preamble.contains(&false));
        let body = changes.iter().find(|c| !c.in_preamble()).unwrap();
        assert!(!body.flags().contains(ChangeFlags::PREAMBLE));
    }

    #[test]
    fn disabled_small_changes() {
        let engine = LexicalDiff::new(DiffConfig::default().with_small_changes(false));
        let changes = engine.diff("the cat", "the car").unwrap();
        assert!(changes.iter().all(|c| !c.kind().is_small()));
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let engine = LexicalDiff::new(DiffConfig::default().with_threshold(0));
        let err = engine.diff("a", "b").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(DiffConfig::default()
            .with_small_changes(false)
            .with_threshold(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn readers_are_diffed() {
        let changes = diff_readers("a b".as_bytes(), "a b c".as_bytes()).unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn unreadable_reader_is_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }
        let err = diff_readers(Broken, "x".as_bytes()).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
