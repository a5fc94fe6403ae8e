//! Lexeme scanning methods for the markup tokenizer
//!
//! Provides specialized scanning functions for whitespace runs, control
//! sequences and words. Character offsets and byte offsets are tracked side
//! by side: bytes for slicing the source, characters for positions.

use crate::{utils::CoreError, Result};
use core::str::Chars;

use super::tokens::TokenType;

/// Characters classified as punctuation
const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '`', '"', '-'];

/// Preamble boundary that follows `\begin`
const DOCUMENT_ARGUMENT: &str = "{document}";

/// Check if a character is layout only
///
/// A byte-order mark counts as whitespace so that it never shows up as a
/// symbol in a diff.
#[must_use]
pub fn is_blank_char(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Check if a character is punctuation
#[must_use]
pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

/// Character navigation helper for tokenizer
///
/// Provides character-level navigation with position tracking and
/// lookahead capabilities for efficient tokenization.
#[derive(Debug, Clone)]
pub struct CharNavigator<'a> {
    /// Source text being scanned
    source: &'a str,
    /// Current byte position in source
    byte_position: usize,
    /// Current character position in source
    position: usize,
    /// Character iterator for the remaining source
    chars: Chars<'a>,
}

impl<'a> CharNavigator<'a> {
    /// Create new character navigator at the start of `source`
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte_position: 0,
            position: 0,
            chars: source.chars(),
        }
    }

    /// Current character position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Current byte position
    #[must_use]
    pub const fn byte_position(&self) -> usize {
        self.byte_position
    }

    /// Unscanned remainder of the source
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }

    /// Peek at current character without advancing
    ///
    /// # Errors
    ///
    /// Returns an error if at end of input.
    pub fn peek_char(&self) -> Result<char> {
        self.chars
            .clone()
            .next()
            .ok_or_else(|| CoreError::tokenization(self.position, "unexpected end of input"))
    }

    /// Peek at the character after the current one
    #[must_use]
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    /// Advance by one character
    ///
    /// # Errors
    ///
    /// Returns an error if at end of input.
    pub fn advance_char(&mut self) -> Result<char> {
        let ch = self
            .chars
            .next()
            .ok_or_else(|| CoreError::tokenization(self.position, "advanced past end of input"))?;
        self.byte_position += ch.len_utf8();
        self.position += 1;
        Ok(ch)
    }

    /// Advance over `text` if the remainder starts with it
    pub fn advance_if_starts_with(&mut self, text: &str) -> bool {
        if !self.remaining().starts_with(text) {
            return false;
        }
        for _ in text.chars() {
            // Cannot fail: the prefix was checked above.
            let _ = self.advance_char();
        }
        true
    }

    /// Advance while `predicate` holds for the current character
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Ok(ch) = self.peek_char() {
            if !predicate(ch) {
                break;
            }
            let _ = self.advance_char();
        }
    }

    /// Check if at end of source
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.byte_position >= self.source.len()
    }
}

/// Scanner for the different lexeme shapes
#[derive(Debug, Clone)]
pub struct LexemeScanner<'a> {
    /// Character navigator for position tracking
    navigator: CharNavigator<'a>,
}

impl<'a> LexemeScanner<'a> {
    /// Create new lexeme scanner
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            navigator: CharNavigator::new(source),
        }
    }

    /// Get current navigator state (mutable)
    pub fn navigator_mut(&mut self) -> &mut CharNavigator<'a> {
        &mut self.navigator
    }

    /// Get current navigator state (immutable)
    #[must_use]
    pub const fn navigator(&self) -> &CharNavigator<'a> {
        &self.navigator
    }

    /// Scan a whitespace run and count its line breaks
    ///
    /// `\r\n` counts as a single break. Returns `Paragraph` for two or more
    /// breaks, `Whitespace` otherwise, plus the break count.
    ///
    /// # Errors
    ///
    /// Returns an error if character navigation fails.
    pub fn scan_whitespace(&mut self) -> Result<(TokenType, usize)> {
        let mut breaks = 0;
        let mut previous = None;

        while !self.navigator.is_at_end() {
            let ch = self.navigator.peek_char()?;
            if !is_blank_char(ch) {
                break;
            }
            match ch {
                '\n' if previous != Some('\r') => breaks += 1,
                '\r' => breaks += 1,
                _ => {}
            }
            previous = Some(ch);
            self.navigator.advance_char()?;
        }

        let token_type = if breaks >= 2 {
            TokenType::Paragraph
        } else {
            TokenType::Whitespace
        };
        Ok((token_type, breaks))
    }

    /// Scan a control sequence starting at `\`
    ///
    /// Returns the lexeme type and whether the sequence was the preamble
    /// boundary `\begin{document}`.
    ///
    /// # Errors
    ///
    /// Returns an error if character navigation fails.
    pub fn scan_command(&mut self) -> Result<(TokenType, bool)> {
        self.navigator.advance_char()?; // Skip '\'

        let Some(next) = self.navigator.peek_char().ok() else {
            return Ok((TokenType::Symbol, false));
        };

        if !next.is_ascii_alphabetic() {
            self.navigator.advance_char()?;
            return Ok((TokenType::Command, false));
        }

        let name_start = self.navigator.byte_position();
        self.navigator.advance_while(|c| c.is_ascii_alphabetic());
        let name = &self.navigator.source[name_start..self.navigator.byte_position()];

        if name == "begin" && self.navigator.advance_if_starts_with(DOCUMENT_ARGUMENT) {
            return Ok((TokenType::Command, true));
        }

        if self.navigator.peek_char().ok() == Some('*') {
            self.navigator.advance_char()?;
        }

        Ok((TokenType::Command, false))
    }

    /// Scan a run of alphanumeric characters
    ///
    /// # Errors
    ///
    /// Returns an error if character navigation fails.
    pub fn scan_word(&mut self) -> Result<TokenType> {
        self.navigator.advance_char()?;
        self.navigator.advance_while(char::is_alphanumeric);
        Ok(TokenType::Word)
    }

    /// Scan a single punctuation or symbol character
    ///
    /// # Errors
    ///
    /// Returns an error if character navigation fails.
    pub fn scan_single(&mut self) -> Result<TokenType> {
        let ch = self.navigator.advance_char()?;
        Ok(match ch {
            '%' => TokenType::CommentBegin,
            c if is_punctuation(c) => TokenType::Punctuation,
            _ => TokenType::Symbol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_tracks_chars_and_bytes() {
        let mut navigator = CharNavigator::new("é1");
        assert_eq!(navigator.peek_char().unwrap(), 'é');
        assert_eq!(navigator.peek_next(), Some('1'));
        navigator.advance_char().unwrap();
        assert_eq!(navigator.position(), 1);
        assert_eq!(navigator.byte_position(), 2);
        assert_eq!(navigator.remaining(), "1");
        navigator.advance_char().unwrap();
        assert!(navigator.is_at_end());
        assert!(navigator.peek_char().is_err());
        assert!(navigator.advance_char().is_err());
    }

    #[test]
    fn whitespace_counts_breaks() {
        let mut scanner = LexemeScanner::new(" \r\n\t x");
        assert_eq!(scanner.scan_whitespace().unwrap(), (TokenType::Whitespace, 1));
        assert_eq!(scanner.navigator().position(), 5);

        let mut scanner = LexemeScanner::new("\n \n");
        assert_eq!(scanner.scan_whitespace().unwrap(), (TokenType::Paragraph, 2));

        let mut scanner = LexemeScanner::new("\r\r");
        assert_eq!(scanner.scan_whitespace().unwrap().0, TokenType::Paragraph);
    }

    #[test]
    fn command_shapes() {
        let mut scanner = LexemeScanner::new("\\section*{x}");
        assert_eq!(scanner.scan_command().unwrap(), (TokenType::Command, false));
        assert_eq!(scanner.navigator().position(), 9);

        let mut scanner = LexemeScanner::new("\\%rest");
        assert_eq!(scanner.scan_command().unwrap(), (TokenType::Command, false));
        assert_eq!(scanner.navigator().position(), 2);

        let mut scanner = LexemeScanner::new("\\begin{document}");
        assert_eq!(scanner.scan_command().unwrap(), (TokenType::Command, true));
        assert!(scanner.navigator().is_at_end());

        let mut scanner = LexemeScanner::new("\\begin{itemize}");
        assert_eq!(scanner.scan_command().unwrap(), (TokenType::Command, false));
        assert_eq!(scanner.navigator().position(), 6);

        let mut scanner = LexemeScanner::new("\\");
        assert_eq!(scanner.scan_command().unwrap(), (TokenType::Symbol, false));
    }

    #[test]
    fn single_character_classes() {
        let mut scanner = LexemeScanner::new("%.$");
        assert_eq!(scanner.scan_single().unwrap(), TokenType::CommentBegin);
        assert_eq!(scanner.scan_single().unwrap(), TokenType::Punctuation);
        assert_eq!(scanner.scan_single().unwrap(), TokenType::Symbol);
    }
}
