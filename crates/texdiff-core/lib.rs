//! # texdiff core
//!
//! Token-level diffing for LaTeX-like markup. Texts are split into typed
//! lexemes (commands, comment markers, words, punctuation, paragraph breaks),
//! compared with a minimal edit script and turned into an ordered list of
//! [`Change`] values that a renderer or the accumulation engine in
//! `texdiff-editor` can apply directly.
//!
//! ## Features
//!
//! - **Markup-aware tokens**: commands and comments never merge with prose in a change
//! - **Small-change detection**: typo fixes become character-level edits instead
//!   of whole-word replacements
//! - **Total order**: changes sort by position, kind rank and creation sequence
//! - **No global state**: every diff run owns its sequence counter
//!
//! ## Quick Start
//!
//! ```rust
//! use texdiff_core::{diff, ChangeKind};
//!
//! let changes = diff("Hello world", "Hello brave world")?;
//! assert_eq!(changes.len(), 1);
//! assert!(matches!(changes[0].kind(), ChangeKind::Addition(_)));
//! assert_eq!(changes[0].start_position(), 6);
//! # Ok::<(), texdiff_core::CoreError>(())
//! ```

#![deny(unsafe_code)]

pub mod changes;
pub mod diff;
pub mod tokenizer;
pub mod utils;

pub use changes::{Addition, Change, ChangeFlags, ChangeKind, Deletion, SequenceCounter};
pub use diff::{diff, diff_readers, DiffConfig, LexicalDiff};
pub use tokenizer::{tokenize, Lexeme, TokenType, Tokenizer};
pub use utils::{CoreError, IndexFlags, IndexLength, IndexPair, PosRange};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn diff_of_identical_documents_is_empty() {
        let text = "\\documentclass{article}\n\\begin{document}\nHello % note\n\\end{document}\n";
        assert!(diff(text, text).unwrap().is_empty());
    }

    #[test]
    fn public_reexports_cover_the_pipeline() {
        let lexemes = tokenize("\\emph{word}", false).unwrap();
        assert_eq!(lexemes.first().map(Lexeme::token_type), Some(TokenType::StartOfFile));

        let changes = LexicalDiff::new(DiffConfig::default())
            .diff("\\emph{word}", "\\textbf{word}")
            .unwrap();
        assert!(changes.iter().any(|c| c.flags().contains(ChangeFlags::COMMAND)));
    }
}
