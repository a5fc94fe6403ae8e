//! # texdiff editor
//!
//! Track-changes accumulation on top of `texdiff-core`. A list of revisions
//! of one document, oldest first, is folded into a single attributed text:
//! the newest version, with every character another revision added styled
//! as an addition by that revision's author, and removed text put back and
//! styled as a deletion.
//!
//! ## Features
//!
//! - **Attributed text**: rope-backed characters with run-length styles
//! - **Newer attributions win**: an older revision never restyles text a
//!   newer one already claimed
//! - **Category filtering**: hide comments, preamble edits, typo fixes or
//!   deletions through [`ChangeFlags`]
//! - **Revision sources**: strings, files and one-shot readers
//! - **Progress and cancellation**: fraction reports and a shared flag
//!   checked between pairwise steps
//!
//! ## Example
//!
//! ```
//! use texdiff_editor::{Accumulator, AccumulateConfig, StyleKind};
//!
//! let revisions = ["cat", "cat dog", "cat dogs"];
//! let accumulator = Accumulator::new(AccumulateConfig::default());
//! let (text, chunks) = accumulator.accumulate(&revisions, None)?;
//!
//! assert_eq!(text, "cat dogs");
//! assert!(chunks.iter().all(|c| c.kind == StyleKind::Addition));
//! assert!(chunks.iter().all(|c| c.start >= 4));
//! # Ok::<(), texdiff_editor::EditorError>(())
//! ```

#![deny(unsafe_code)]

pub mod accumulate;
pub mod core;

pub use accumulate::{
    accumulate, AccumulateConfig, Accumulator, NoProgress, ProgressListener, ReaderRevision,
    RevisionSource,
};
pub use crate::core::{Attribute, AttributedText, EditorError, Result, Rgb, StyleChunk, StyleKind};

// Re-export the core vocabulary used in the editor API
pub use texdiff_core::{diff, Change, ChangeFlags, ChangeKind, DiffConfig};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
