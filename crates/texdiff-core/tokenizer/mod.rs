//! Markup tokenizer module
//!
//! Provides zero-copy lexical analysis of LaTeX-like markup. The tokenizer
//! tracks two pieces of state while scanning: whether it is inside a `%`
//! comment (which runs to the end of the line) and whether the preamble
//! boundary `\begin{document}` has been passed.
//!
//! [`Tokenizer::next_lexeme`] yields the raw lexeme stream, whitespace
//! included. [`tokenize`] produces the list the diff engine consumes: framed
//! by `StartOfFile`/`EndOfFile` markers, without whitespace and without
//! paragraph breaks that precede the preamble boundary.
//!
//! # Example
//!
//! ```rust
//! use texdiff_core::tokenizer::{Tokenizer, TokenType};
//!
//! let mut tokenizer = Tokenizer::new("Hello, world");
//! let mut kinds = Vec::new();
//! while let Some(lexeme) = tokenizer.next_lexeme()? {
//!     kinds.push(lexeme.token_type());
//! }
//! assert_eq!(
//!     kinds,
//!     [TokenType::Word, TokenType::Punctuation, TokenType::Whitespace, TokenType::Word]
//! );
//! # Ok::<(), texdiff_core::CoreError>(())
//! ```

use crate::{utils::CoreError, Result};

pub mod scanner;
pub mod state;
pub mod tokens;

pub use scanner::{CharNavigator, LexemeScanner};
pub use state::ScanContext;
pub use tokens::{Lexeme, TokenType};

/// Incremental tokenizer for markup text with zero-copy design
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// Source text being tokenized
    source: &'a str,
    /// Scanner for character processing
    scanner: LexemeScanner<'a>,
    /// Comment and preamble state
    context: ScanContext,
    /// Comment state the tokenizer was started with
    start_in_comment: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create new tokenizer for source text
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_comment_state(source, false)
    }

    /// Create a tokenizer that optionally starts inside a comment
    ///
    /// Used when the text is a fragment that begins in the middle of a
    /// commented line.
    #[must_use]
    pub fn with_comment_state(source: &'a str, start_in_comment: bool) -> Self {
        Self {
            source,
            scanner: LexemeScanner::new(source),
            context: ScanContext::new(start_in_comment),
            start_in_comment,
        }
    }

    /// Get next raw lexeme from the input
    ///
    /// Returns `None` at end of input. Whitespace lexemes are included.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner fails to make progress.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme<'a>>> {
        if self.scanner.navigator().is_at_end() {
            return Ok(None);
        }

        let start_pos = self.scanner.navigator().position();
        let start_byte = self.scanner.navigator().byte_position();
        let before = self.context;
        let current_char = self.scanner.navigator().peek_char()?;

        let (token_type, context) = match current_char {
            c if scanner::is_blank_char(c) => {
                let (token_type, breaks) = self.scanner.scan_whitespace()?;
                let context = if breaks > 0 { before.end_line() } else { before };
                (token_type, context)
            }
            '\\' => {
                let (token_type, is_boundary) = self.scanner.scan_command()?;
                let context = if is_boundary {
                    before.mark_preamble()
                } else {
                    before
                };
                (token_type, context)
            }
            c if c.is_alphanumeric() => (self.scanner.scan_word()?, before),
            _ => {
                let token_type = self.scanner.scan_single()?;
                let context = if token_type == TokenType::CommentBegin {
                    before.enter_comment()
                } else {
                    before
                };
                (token_type, context)
            }
        };

        let end_pos = self.scanner.navigator().position();
        if end_pos == start_pos {
            return Err(CoreError::tokenization(start_pos, "position not advancing"));
        }

        let end_byte = self.scanner.navigator().byte_position();
        let contents = &self.source[start_byte..end_byte];

        // Layout that ends a line belongs to the following line.
        let in_comment = if token_type.is_blank() {
            context.in_comment()
        } else {
            before.in_comment()
        };

        self.context = context;
        Ok(Some(Lexeme::new(
            token_type,
            contents,
            start_pos,
            context.preamble_seen(),
            in_comment,
        )))
    }

    /// Tokenize the whole source into the list used for diffing
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization fails anywhere in the input.
    pub fn tokenize_all(&mut self) -> Result<Vec<Lexeme<'a>>> {
        let mut lexemes = vec![Lexeme::marker(
            TokenType::StartOfFile,
            0,
            false,
            self.start_in_comment,
        )];

        while let Some(lexeme) = self.next_lexeme()? {
            if lexeme.token_type() != TokenType::Whitespace {
                lexemes.push(lexeme);
            }
        }

        lexemes.push(Lexeme::marker(
            TokenType::EndOfFile,
            self.position(),
            self.context.preamble_seen(),
            self.context.in_comment(),
        ));

        if lexemes.iter().any(Lexeme::preamble_seen) {
            lexemes.retain(|l| l.token_type() != TokenType::Paragraph || l.preamble_seen());
        }

        log::trace!(
            "tokenized {} characters into {} lexemes",
            self.position(),
            lexemes.len()
        );
        Ok(lexemes)
    }

    /// Current character position in source
    #[must_use]
    pub const fn position(&self) -> usize {
        self.scanner.navigator().position()
    }

    /// Current scanner state
    #[must_use]
    pub const fn context(&self) -> ScanContext {
        self.context
    }
}

/// Tokenize `source` into the lexeme list used by the diff engine
///
/// The list starts with a `StartOfFile` marker at offset 0 and ends with an
/// `EndOfFile` marker at the character length of the source. Whitespace is
/// dropped. Paragraph breaks before `\begin{document}` are dropped when the
/// source contains that boundary.
///
/// # Errors
///
/// Returns an error if the scanner fails; no partial list is returned.
pub fn tokenize(source: &str, start_in_comment: bool) -> Result<Vec<Lexeme<'_>>> {
    Tokenizer::with_comment_state(source, start_in_comment).tokenize_all()
}

#[cfg(test)]
mod tests;
