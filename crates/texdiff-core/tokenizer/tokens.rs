//! Lexeme definitions for markup tokenization
//!
//! Provides zero-copy lexemes for the lexical diff. Every lexeme borrows its
//! contents from the source text and records where it sits in character
//! offsets, together with the scanner state (comment, preamble) it was
//! produced in.
//!
//! # Example
//!
//! ```rust
//! use texdiff_core::tokenizer::{tokenize, TokenType};
//!
//! let lexemes = tokenize("\\section{Intro} Text.", false)?;
//! let kinds: Vec<TokenType> = lexemes.iter().map(|l| l.token_type()).collect();
//! assert_eq!(kinds[1], TokenType::Command);
//! assert_eq!(lexemes[1].contents(), "\\section");
//! # Ok::<(), texdiff_core::CoreError>(())
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lexeme type discriminant
///
/// Only printable types contribute their contents to the diffed
/// representation; the others compare by type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenType {
    /// Control sequence such as `\section`, `\\` or `\begin{document}`
    Command,

    /// Comment marker `%`
    CommentBegin,

    /// Sentence punctuation (`.`, `,`, `;`, `:`, `!`, `?`, quotes, `-`)
    Punctuation,

    /// Any other single non-word character (braces, `$`, `&`, ...)
    Symbol,

    /// Run of alphanumeric characters
    Word,

    /// Whitespace containing two or more line breaks
    Paragraph,

    /// Spaces, tabs and single line breaks
    Whitespace,

    /// Synthetic marker at offset 0
    StartOfFile,

    /// Synthetic marker at the end of the text
    EndOfFile,
}

impl TokenType {
    /// Check if the contents of this type take part in comparison
    #[must_use]
    pub const fn is_printable(self) -> bool {
        matches!(
            self,
            Self::Command | Self::CommentBegin | Self::Punctuation | Self::Symbol | Self::Word
        )
    }

    /// Check if this type only carries layout
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Whitespace | Self::Paragraph)
    }

    /// Check if this type is one of the synthetic file markers
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::StartOfFile | Self::EndOfFile)
    }

    /// Get human-readable name for logs and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::CommentBegin => "comment begin",
            Self::Punctuation => "punctuation",
            Self::Symbol => "symbol",
            Self::Word => "word",
            Self::Paragraph => "paragraph",
            Self::Whitespace => "whitespace",
            Self::StartOfFile => "start of file",
            Self::EndOfFile => "end of file",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lexeme produced by the tokenizer with a zero-copy span
///
/// Immutable once built. `pos` and `len` are character offsets into the
/// source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexeme<'a> {
    /// Lexeme type discriminant
    token_type: TokenType,
    /// Zero-copy span referencing source text
    contents: &'a str,
    /// Character offset of the first character
    pos: usize,
    /// Length in characters
    length: usize,
    /// Whether the preamble boundary was reached at or before this lexeme
    preamble_seen: bool,
    /// Whether this lexeme was scanned inside a comment
    in_comment: bool,
}

impl<'a> Lexeme<'a> {
    /// Create new lexeme with full state information
    #[must_use]
    pub fn new(
        token_type: TokenType,
        contents: &'a str,
        pos: usize,
        preamble_seen: bool,
        in_comment: bool,
    ) -> Self {
        Self {
            token_type,
            contents,
            pos,
            length: contents.chars().count(),
            preamble_seen,
            in_comment,
        }
    }

    /// Create one of the zero-length file markers
    #[must_use]
    pub const fn marker(
        token_type: TokenType,
        pos: usize,
        preamble_seen: bool,
        in_comment: bool,
    ) -> Self {
        Self {
            token_type,
            contents: "",
            pos,
            length: 0,
            preamble_seen,
            in_comment,
        }
    }

    /// Lexeme type
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Source text covered by the lexeme
    #[must_use]
    pub const fn contents(&self) -> &'a str {
        self.contents
    }

    /// Character offset of the first character
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Length in characters
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Check if the lexeme covers no characters (file markers only)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Character offset one past the last character
    #[must_use]
    pub const fn end(&self) -> usize {
        self.pos + self.length
    }

    /// Whether the preamble boundary was reached at or before this lexeme
    #[must_use]
    pub const fn preamble_seen(&self) -> bool {
        self.preamble_seen
    }

    /// Whether this lexeme was scanned inside a comment
    #[must_use]
    pub const fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Key used to compare lexemes across two texts
    ///
    /// Non-printable lexemes compare by type only, so two paragraph breaks
    /// of different shape are considered equal.
    #[must_use]
    pub const fn comparison_key(&self) -> (TokenType, &'a str) {
        if self.token_type.is_printable() {
            (self.token_type, self.contents)
        } else {
            (self.token_type, "")
        }
    }

    /// Check if this lexeme belongs to the command/comment class
    ///
    /// Runs of this class are never merged with prose in a single change.
    #[must_use]
    pub const fn is_command_or_comment(&self) -> bool {
        self.in_comment || matches!(self.token_type, TokenType::Command | TokenType::CommentBegin)
    }

    /// Check if this lexeme is a command outside of any comment
    #[must_use]
    pub const fn is_command(&self) -> bool {
        !self.in_comment && matches!(self.token_type, TokenType::Command)
    }

    /// Check if this lexeme is a comment marker or lies inside a comment
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.in_comment || matches!(self.token_type, TokenType::CommentBegin)
    }

    /// Check if this lexeme carries no visible text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.token_type.is_blank() || self.contents.trim().is_empty()
    }
}

impl fmt::Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{}+{} '{}'",
            self.token_type, self.pos, self.length, self.contents
        )
    }
}
