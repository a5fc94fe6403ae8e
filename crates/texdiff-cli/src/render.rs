//! Text output for changes and annotated histories

use std::fmt::Write;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use texdiff_core::utils::{char_len, char_slice};
use texdiff_core::{Change, ChangeKind};
use texdiff_editor::{Rgb, StyleChunk, StyleKind};

/// Author palette used when none is given on the command line
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb::new(158, 206, 106),
    Rgb::new(122, 162, 247),
    Rgb::new(224, 175, 104),
    Rgb::new(187, 154, 247),
    Rgb::new(115, 218, 202),
    Rgb::new(247, 118, 142),
];

/// JSON shape of an annotated history
#[derive(Debug, Serialize)]
pub struct Annotated<'a> {
    /// Accumulated text
    pub text: &'a str,
    /// Styled ranges of `text`
    pub chunks: &'a [StyleChunk],
}

/// Text a change shows: the added range of `new` or the removed text
fn change_text<'a>(change: &'a Change, new: &'a str) -> Result<&'a str> {
    match change.kind() {
        ChangeKind::Addition(a) | ChangeKind::SmallAddition(a) => {
            slice(new, change.start_position(), a.end_position())
        }
        ChangeKind::Deletion(d) | ChangeKind::SmallDeletion(d) => Ok(d.text()),
        ChangeKind::Translocation { .. } => Ok(""),
    }
}

/// Character slice that fails instead of clamping
fn slice(text: &str, start: usize, end: usize) -> Result<&str> {
    char_slice(text, start, end)
        .with_context(|| format!("Range {start}..{end} lies outside the text"))
}

/// One line per change: position, kind, flags and text
pub fn change_list(changes: &[Change], new: &str) -> Result<String> {
    let mut out = String::new();
    for change in changes {
        let labels = change.flags().labels().join(",");
        writeln!(
            out,
            "{:>6}  {:<15} {:<24} {:?}",
            change.start_position(),
            change.kind().name(),
            if labels.is_empty() { "-" } else { labels.as_str() },
            change_text(change, new)?
        )?;
    }
    Ok(out)
}

/// Annotated text with ANSI styles
///
/// Additions are underlined and deletions struck through, both in the
/// chunk colour.
pub fn ansi(text: &str, chunks: &[StyleChunk]) -> Result<String> {
    styled(text, chunks, |segment, chunk| {
        let color = chunk.color.unwrap_or(DEFAULT_PALETTE[chunk.author % DEFAULT_PALETTE.len()]);
        let color = owo_colors::Rgb(color.r, color.g, color.b);
        match chunk.kind {
            StyleKind::Addition => segment.color(color).underline().to_string(),
            StyleKind::Deletion => segment.color(color).strikethrough().to_string(),
            StyleKind::None => segment.to_string(),
        }
    })
}

/// Annotated text with `{+added+}` and `[-deleted-]` markers
pub fn markers(text: &str, chunks: &[StyleChunk]) -> Result<String> {
    styled(text, chunks, |segment, chunk| match chunk.kind {
        StyleKind::Addition => format!("{{+{segment}+}}"),
        StyleKind::Deletion => format!("[-{segment}-]"),
        StyleKind::None => segment.to_string(),
    })
}

/// Copy `text`, passing each chunk through `style`
fn styled<F>(text: &str, chunks: &[StyleChunk], mut style: F) -> Result<String>
where
    F: FnMut(&str, &StyleChunk) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for chunk in chunks {
        out.push_str(slice(text, cursor, chunk.start)?);
        out.push_str(&style(slice(text, chunk.start, chunk.end)?, chunk));
        cursor = chunk.end;
    }
    out.push_str(slice(text, cursor, char_len(text))?);
    Ok(out)
}
