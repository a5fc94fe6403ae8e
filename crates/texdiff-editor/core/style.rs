//! Character styles of the accumulated text
//!
//! Every character carries an [`Attribute`]: plain, added or deleted, plus
//! the author index, an optional colour and the change flags it came from.
//! [`StyleChunk`] is the compact, renderer-facing form of a styled range.

use core::fmt;
use core::str::FromStr;
use texdiff_core::ChangeFlags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::errors::EditorError;

/// Kind of style applied to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StyleKind {
    /// Unchanged text
    #[default]
    None,
    /// Text added by some revision
    Addition,
    /// Text removed by some revision, shown struck through
    Deletion,
}

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] if the value is not six hex digits.
    pub fn parse_hex(value: &str) -> Result<Self, EditorError> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EditorError::config(format!("invalid colour '{value}'")));
        }
        let channel = |range: core::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| EditorError::config(format!("invalid colour '{value}'")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl FromStr for Rgb {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Style of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Plain, added or deleted
    pub kind: StyleKind,
    /// Index of the revision author
    pub author: usize,
    /// Author colour, if a palette was configured
    pub color: Option<Rgb>,
    /// Flags of the change that produced the style
    pub flags: ChangeFlags,
}

impl Attribute {
    /// Unstyled text
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            kind: StyleKind::None,
            author: 0,
            color: None,
            flags: ChangeFlags::empty(),
        }
    }

    /// Text added by `author`
    #[must_use]
    pub const fn addition(author: usize, color: Option<Rgb>, flags: ChangeFlags) -> Self {
        Self {
            kind: StyleKind::Addition,
            author,
            color,
            flags,
        }
    }

    /// Text removed by `author`
    #[must_use]
    pub const fn deletion(author: usize, color: Option<Rgb>, flags: ChangeFlags) -> Self {
        Self {
            kind: StyleKind::Deletion,
            author,
            color,
            flags,
        }
    }

    /// Check if the character is unstyled
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self.kind, StyleKind::None)
    }

    /// Check if the character was added
    #[must_use]
    pub const fn is_addition(&self) -> bool {
        matches!(self.kind, StyleKind::Addition)
    }

    /// Check if the character was removed
    #[must_use]
    pub const fn is_deletion(&self) -> bool {
        matches!(self.kind, StyleKind::Deletion)
    }

    /// Key under which neighbouring ranges merge into one chunk
    const fn chunk_key(&self) -> (StyleKind, Option<Rgb>, usize) {
        (self.kind, self.color, self.author)
    }
}

/// A maximal styled range of the accumulated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleChunk {
    /// First character offset
    pub start: usize,
    /// Offset just past the last character
    pub end: usize,
    /// Addition or deletion, never `None`
    pub kind: StyleKind,
    /// Index of the revision author
    pub author: usize,
    /// Author colour, if a palette was configured
    pub color: Option<Rgb>,
}

impl StyleChunk {
    /// Length in characters
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the chunk covers no character
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Build chunks from `(start, end, attribute)` ranges in text order
    ///
    /// Plain ranges are skipped. Touching ranges with the same kind, colour
    /// and author merge, whatever their flags.
    pub(crate) fn compact<I>(ranges: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (usize, usize, Attribute)>,
    {
        let mut chunks: Vec<Self> = Vec::new();
        let mut last_key = None;
        for (start, end, attribute) in ranges {
            if attribute.is_plain() || start == end {
                last_key = None;
                continue;
            }
            let key = attribute.chunk_key();
            match chunks.last_mut() {
                Some(chunk) if last_key == Some(key) && chunk.end == start => chunk.end = end,
                _ => chunks.push(Self {
                    start,
                    end,
                    kind: attribute.kind,
                    author: attribute.author,
                    color: attribute.color,
                }),
            }
            last_key = Some(key);
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colour_parsing() {
        assert_eq!(Rgb::parse_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("0a0B0c".parse::<Rgb>().unwrap(), Rgb::new(10, 11, 12));
        assert!(Rgb::parse_hex("#fff").is_err());
        assert!(Rgb::parse_hex("#gg0000").is_err());
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn compact_merges_same_author_across_flags() {
        let red = Some(Rgb::new(255, 0, 0));
        let ranges = vec![
            (0, 2, Attribute::plain()),
            (2, 4, Attribute::addition(1, red, ChangeFlags::COMMAND)),
            (4, 6, Attribute::addition(1, red, ChangeFlags::empty())),
            (6, 7, Attribute::deletion(1, red, ChangeFlags::DELETION)),
            (7, 9, Attribute::addition(2, None, ChangeFlags::empty())),
        ];
        let chunks = StyleChunk::compact(ranges);
        assert_eq!(
            chunks
                .iter()
                .map(|c| (c.start, c.end, c.kind, c.author))
                .collect::<Vec<_>>(),
            vec![
                (2, 6, StyleKind::Addition, 1),
                (6, 7, StyleKind::Deletion, 1),
                (7, 9, StyleKind::Addition, 2),
            ]
        );
    }

    #[test]
    fn plain_gap_splits_chunks() {
        let attribute = Attribute::addition(0, None, ChangeFlags::empty());
        let chunks = StyleChunk::compact(vec![
            (0, 1, attribute),
            (1, 2, Attribute::plain()),
            (2, 3, attribute),
        ]);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 1 && !c.is_empty()));
    }
}
