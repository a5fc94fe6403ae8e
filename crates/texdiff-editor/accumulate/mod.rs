//! Multi-revision change accumulation
//!
//! Folds a list of revisions, oldest first, into one [`AttributedText`]:
//! the newest text with every surviving character attributed to the
//! revision that introduced it, and removed text re-inserted as deletions.
//! Revisions are merged pairwise from newest to oldest, each older revision
//! diffed against the text accumulated so far.
//!
//! # Examples
//!
//! ```
//! use texdiff_editor::{accumulate, ChangeFlags, StyleKind};
//!
//! let revisions = ["Hello world", "Hello brave world"];
//! let (text, chunks) = accumulate(&revisions, None, ChangeFlags::empty())?;
//! assert_eq!(text, "Hello brave world");
//! assert_eq!(chunks.len(), 1);
//! assert_eq!((chunks[0].start, chunks[0].end), (6, 12));
//! assert_eq!(chunks[0].kind, StyleKind::Addition);
//! assert_eq!(chunks[0].author, 1);
//! # Ok::<(), texdiff_editor::EditorError>(())
//! ```

pub mod progress;
pub mod revision;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use texdiff_core::{Change, ChangeFlags, ChangeKind, DiffConfig, LexicalDiff};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{Attribute, AttributedText, EditorError, Result, Rgb, StyleChunk};

pub use progress::{NoProgress, ProgressListener};
pub use revision::{ReaderRevision, RevisionSource};

/// Configuration of an accumulation run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccumulateConfig {
    /// Settings of each pairwise diff
    pub diff: DiffConfig,
    /// Changes whose flags intersect these are filtered out at the end
    pub hide: ChangeFlags,
    /// Author palette, indexed by `author % len`
    pub author_colors: Vec<Rgb>,
}

impl AccumulateConfig {
    /// Use `diff` for every pairwise diff
    #[must_use]
    pub const fn with_diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }

    /// Filter out changes whose flags intersect `hide`
    #[must_use]
    pub const fn with_hide(mut self, hide: ChangeFlags) -> Self {
        self.hide = hide;
        self
    }

    /// Colour authors from `colors`
    #[must_use]
    pub fn with_author_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.author_colors = colors;
        self
    }

    /// Colour of an author, if a palette is configured
    #[must_use]
    pub fn color_for(&self, author: usize) -> Option<Rgb> {
        if self.author_colors.is_empty() {
            None
        } else {
            Some(self.author_colors[author % self.author_colors.len()])
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Core`] wrapping the diff configuration error.
    pub fn validate(&self) -> Result<()> {
        self.diff.validate()?;
        Ok(())
    }
}

/// Accumulation engine
///
/// Holds the configuration and an optional cancellation flag shared with
/// the caller. Each call owns its own attributed text.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    /// Settings of every run
    config: AccumulateConfig,
    /// Set by the caller to stop between pairwise steps
    cancel: Option<Arc<AtomicBool>>,
}

impl Accumulator {
    /// Create an engine without a cancellation flag
    #[must_use]
    pub const fn new(config: AccumulateConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop between pairwise steps once `flag` is set
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &AccumulateConfig {
        &self.config
    }

    /// Accumulate revisions into flat text and style chunks
    ///
    /// `revisions` is ordered oldest first. `authors` is used only when it
    /// has one entry per revision; otherwise a revision's author is its
    /// position in the list.
    ///
    /// # Errors
    ///
    /// See [`Accumulator::accumulate_attributed`].
    pub fn accumulate<S: RevisionSource>(
        &self,
        revisions: &[S],
        authors: Option<&[usize]>,
    ) -> Result<(String, Vec<StyleChunk>)> {
        self.accumulate_with_progress(revisions, authors, &mut NoProgress)
    }

    /// [`Accumulator::accumulate`] reporting progress to `listener`
    ///
    /// # Errors
    ///
    /// See [`Accumulator::accumulate_attributed`].
    pub fn accumulate_with_progress<S, P>(
        &self,
        revisions: &[S],
        authors: Option<&[usize]>,
        listener: &mut P,
    ) -> Result<(String, Vec<StyleChunk>)>
    where
        S: RevisionSource,
        P: ProgressListener + ?Sized,
    {
        let text = self.accumulate_attributed(revisions, authors, listener)?;
        Ok((text.text(), text.chunks()))
    }

    /// Accumulate revisions into an [`AttributedText`]
    ///
    /// # Errors
    ///
    /// - [`EditorError::Config`] or [`EditorError::Core`] for an invalid configuration
    /// - [`EditorError::RevisionRead`] if a revision cannot be read
    /// - [`EditorError::Cancelled`] if the cancellation flag was set
    /// - position errors if a change does not fit the accumulated text
    pub fn accumulate_attributed<S, P>(
        &self,
        revisions: &[S],
        authors: Option<&[usize]>,
        listener: &mut P,
    ) -> Result<AttributedText>
    where
        S: RevisionSource,
        P: ProgressListener + ?Sized,
    {
        self.config.validate()?;
        let Some(newest) = revisions.len().checked_sub(1) else {
            listener.on_progress(1.0);
            return Ok(AttributedText::new());
        };

        let authors = authors.filter(|a| a.len() == revisions.len());
        let engine = LexicalDiff::new(self.config.diff);
        let steps = newest;
        let mut text = AttributedText::from_text(&read_revision(revisions, newest)?);

        for index in (1..=newest).rev() {
            let completed = newest - index;
            if self.is_cancelled() {
                log::debug!("accumulation cancelled after {completed} step(s)");
                return Err(EditorError::Cancelled { completed });
            }

            let older = read_revision(revisions, index - 1)?;
            let current = text.text();
            let changes = engine.diff(&older, &current)?;
            let author = authors.map_or(index, |a| a[index]);
            log::debug!(
                "merging revision {} into {}: {} change(s), author {author}",
                index - 1,
                index,
                changes.len()
            );

            if !changes.is_empty() {
                apply_changes(&mut text, &changes, author, self.config.color_for(author))?;
            }
            listener.on_progress(progress::fraction(completed + 1, steps + 1));
        }

        if !self.config.hide.is_empty() {
            log::debug!("filtering flags {:?}", self.config.hide.labels());
            text.hide(self.config.hide);
        }
        listener.on_progress(1.0);
        Ok(text)
    }

    /// Check the caller's cancellation flag
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Read one revision, tagging a failure with its index
fn read_revision<S: RevisionSource>(revisions: &[S], index: usize) -> Result<String> {
    revisions[index]
        .read_text()
        .map_err(|e| EditorError::revision_read(index, e))
}

/// Apply one pairwise diff to the accumulated text
fn apply_changes(
    text: &mut AttributedText,
    changes: &[Change],
    author: usize,
    color: Option<Rgb>,
) -> Result<()> {
    let mut offset = 0;
    for change in changes {
        let start = change.start_position() + offset;
        match change.kind() {
            ChangeKind::Deletion(deletion) | ChangeKind::SmallDeletion(deletion) => {
                let mut at = start;
                for (fragment, flags) in deletion.flagged_subspans() {
                    text.insert(at, fragment, Attribute::deletion(author, color, *flags))?;
                    at += fragment.chars().count();
                }
                offset += deletion.char_len();
            }
            ChangeKind::Addition(addition) | ChangeKind::SmallAddition(addition) => {
                for (from, to, flags) in addition.spans(change.start_position()) {
                    text.set_style_if_plain(
                        start + from,
                        to - from,
                        Attribute::addition(author, color, flags),
                    )?;
                }
            }
            ChangeKind::Translocation { .. } => {}
        }
    }
    Ok(())
}

/// Accumulate revisions with the default configuration and `hide` flags
///
/// # Errors
///
/// See [`Accumulator::accumulate_attributed`].
pub fn accumulate<S: RevisionSource>(
    revisions: &[S],
    authors: Option<&[usize]>,
    hide: ChangeFlags,
) -> Result<(String, Vec<StyleChunk>)> {
    Accumulator::new(AccumulateConfig::default().with_hide(hide)).accumulate(revisions, authors)
}
