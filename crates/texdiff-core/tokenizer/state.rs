//! Tokenizer state management
//!
//! Tracks the two pieces of context that change how lexemes are classified:
//! whether the scanner is inside a `%` comment and whether the preamble
//! boundary (`\begin{document}`) has been passed.

/// Scanner context carried from one lexeme to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanContext {
    /// Inside a comment that runs to the end of the line
    in_comment: bool,
    /// The preamble boundary has been passed
    preamble_seen: bool,
}

impl ScanContext {
    /// Create a context, optionally starting inside a comment
    #[must_use]
    pub const fn new(start_in_comment: bool) -> Self {
        Self {
            in_comment: start_in_comment,
            preamble_seen: false,
        }
    }

    /// Whether the scanner is inside a comment
    #[must_use]
    pub const fn in_comment(self) -> bool {
        self.in_comment
    }

    /// Whether the preamble boundary has been passed
    #[must_use]
    pub const fn preamble_seen(self) -> bool {
        self.preamble_seen
    }

    /// Transition into comment state after a `%`
    #[must_use]
    pub const fn enter_comment(self) -> Self {
        Self {
            in_comment: true,
            ..self
        }
    }

    /// A line break ends any comment
    #[must_use]
    pub const fn end_line(self) -> Self {
        Self {
            in_comment: false,
            ..self
        }
    }

    /// Record the preamble boundary; ignored inside comments
    #[must_use]
    pub const fn mark_preamble(self) -> Self {
        if self.in_comment {
            self
        } else {
            Self {
                preamble_seen: true,
                ..self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lifecycle() {
        let ctx = ScanContext::new(false);
        assert!(!ctx.in_comment());
        let ctx = ctx.enter_comment();
        assert!(ctx.in_comment());
        assert!(!ctx.end_line().in_comment());
        assert!(ScanContext::new(true).in_comment());
    }

    #[test]
    fn preamble_marker_ignored_in_comment() {
        let ctx = ScanContext::new(false).enter_comment().mark_preamble();
        assert!(!ctx.preamble_seen());
        let ctx = ctx.end_line().mark_preamble();
        assert!(ctx.preamble_seen());
        assert!(ctx.end_line().preamble_seen());
    }
}
