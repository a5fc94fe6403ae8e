//! Comprehensive tests for tokenizer functionality

use super::*;
use crate::utils::char_slice;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenType> {
    tokenize(source, false)
        .unwrap()
        .iter()
        .map(Lexeme::token_type)
        .collect()
}

fn contents(source: &str) -> Vec<&str> {
    tokenize(source, false)
        .unwrap()
        .into_iter()
        .map(|l| l.contents())
        .collect()
}

#[test]
fn tokenize_whitespace_only() {
    assert_eq!(
        kinds("   \t  "),
        [TokenType::StartOfFile, TokenType::EndOfFile]
    );
}

#[test]
fn tokenize_words_and_punctuation() {
    assert_eq!(
        contents("Hello, world!"),
        ["", "Hello", ",", "world", "!", ""]
    );
    assert_eq!(
        kinds("x-y"),
        [
            TokenType::StartOfFile,
            TokenType::Word,
            TokenType::Punctuation,
            TokenType::Word,
            TokenType::EndOfFile
        ]
    );
}

#[test]
fn tokenize_symbols() {
    assert_eq!(
        kinds("{$}"),
        [
            TokenType::StartOfFile,
            TokenType::Symbol,
            TokenType::Symbol,
            TokenType::Symbol,
            TokenType::EndOfFile
        ]
    );
}

#[test]
fn tokenize_commands() {
    assert_eq!(
        contents("\\section*{Intro}\\\\ \\% \\"),
        ["", "\\section*", "{", "Intro", "}", "\\\\", "\\%", "\\", ""]
    );
    let lexemes = tokenize("\\", false).unwrap();
    assert_eq!(lexemes[1].token_type(), TokenType::Symbol);
}

#[test]
fn positions_are_character_offsets() {
    let lexemes = tokenize("é über x", false).unwrap();
    assert_eq!(lexemes[1].pos(), 0);
    assert_eq!(lexemes[2].pos(), 2);
    assert_eq!(lexemes[2].len(), 4);
    assert_eq!(lexemes[3].pos(), 7);
    assert_eq!(lexemes[4].pos(), 8);
}

#[test]
fn end_of_file_sits_at_text_length() {
    let lexemes = tokenize("ab  ", false).unwrap();
    let eof = lexemes.last().unwrap();
    assert_eq!(eof.token_type(), TokenType::EndOfFile);
    assert_eq!(eof.pos(), 4);
}

#[test]
fn byte_order_mark_is_whitespace() {
    assert_eq!(
        kinds("\u{FEFF}word"),
        [TokenType::StartOfFile, TokenType::Word, TokenType::EndOfFile]
    );
}

#[test]
fn paragraph_needs_two_line_breaks() {
    assert_eq!(
        kinds("a\nb"),
        [
            TokenType::StartOfFile,
            TokenType::Word,
            TokenType::Word,
            TokenType::EndOfFile
        ]
    );
    assert_eq!(kinds("a\n  \nb")[2], TokenType::Paragraph);
    assert_eq!(kinds("a\r\n\r\nb")[2], TokenType::Paragraph);
    assert_eq!(kinds("a\r\nb")[2], TokenType::Word);
}

#[test]
fn comment_runs_to_end_of_line() {
    let lexemes = tokenize("a % b \\c\nd", false).unwrap();
    let states: Vec<(&str, bool)> = lexemes
        .iter()
        .map(|l| (l.contents(), l.in_comment()))
        .collect();
    assert_eq!(
        states,
        [
            ("", false),
            ("a", false),
            ("%", false),
            ("b", true),
            ("\\c", true),
            ("d", false),
            ("", false)
        ]
    );
    assert!(lexemes[2].is_comment());
    assert!(!lexemes[4].is_command());
}

#[test]
fn paragraph_ends_comment() {
    let lexemes = tokenize("% note\n\nText", false).unwrap();
    let paragraph = lexemes
        .iter()
        .find(|l| l.token_type() == TokenType::Paragraph)
        .unwrap();
    assert!(!paragraph.in_comment());
    assert!(!lexemes[4].in_comment());
}

#[test]
fn start_in_comment() {
    let lexemes = tokenize("b\nc", true).unwrap();
    assert!(lexemes[0].in_comment());
    assert!(lexemes[1].in_comment());
    assert!(!lexemes[2].in_comment());
}

#[test]
fn preamble_boundary_is_one_command() {
    let lexemes = tokenize("\\begin{document}x", false).unwrap();
    assert_eq!(lexemes[1].contents(), "\\begin{document}");
    assert_eq!(lexemes[1].token_type(), TokenType::Command);
    assert!(lexemes[1].preamble_seen());
    assert!(lexemes[2].preamble_seen());
    assert!(!lexemes[0].preamble_seen());
}

#[test]
fn paragraphs_before_preamble_are_stripped() {
    let source = "\\documentclass{article}\n\n\\begin{document}\n\nText\n\nMore";
    let lexemes = tokenize(source, false).unwrap();
    let paragraphs: Vec<&Lexeme<'_>> = lexemes
        .iter()
        .filter(|l| l.token_type() == TokenType::Paragraph)
        .collect();
    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs.iter().all(|l| l.preamble_seen()));
}

#[test]
fn paragraphs_kept_without_boundary() {
    let lexemes = tokenize("One\n\nTwo", false).unwrap();
    assert_eq!(lexemes[2].token_type(), TokenType::Paragraph);
}

#[test]
fn commented_boundary_does_not_count() {
    let lexemes = tokenize("% \\begin{document}\n\nText", false).unwrap();
    assert!(lexemes.iter().all(|l| !l.preamble_seen()));
    assert!(lexemes
        .iter()
        .any(|l| l.token_type() == TokenType::Paragraph));
}

proptest! {
    #[test]
    fn lexemes_cover_source_in_order(source in "[a-z \\n%\\\\{}.,é]{0,60}") {
        let lexemes = tokenize(&source, false).unwrap();
        prop_assert_eq!(lexemes[0].token_type(), TokenType::StartOfFile);
        prop_assert_eq!(lexemes.last().map(Lexeme::pos), Some(source.chars().count()));

        for pair in lexemes.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].pos());
        }
        for lexeme in &lexemes {
            prop_assert_eq!(
                char_slice(&source, lexeme.pos(), lexeme.end()),
                Some(lexeme.contents())
            );
            prop_assert_ne!(lexeme.token_type(), TokenType::Whitespace);
        }
    }
}
