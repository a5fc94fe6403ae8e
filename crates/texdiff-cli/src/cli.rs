//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use texdiff_core::{ChangeFlags, DiffConfig};
use texdiff_editor::Rgb;

#[derive(Debug, Parser)]
#[command(name = "texdiff", version, about = "Track changes across revisions of LaTeX-like documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the changes between two revisions
    Diff {
        /// Older revision
        old: PathBuf,
        /// Newer revision
        new: PathBuf,

        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Fold revisions, oldest first, into one annotated text
    Annotate {
        /// Revisions, oldest first
        #[arg(required = true)]
        revisions: Vec<PathBuf>,

        /// Change categories to hide (preamble, comment, command, deletion, small)
        #[arg(long, value_delimiter = ',', value_parser = parse_flag)]
        hide: Vec<ChangeFlags>,

        /// Author index of each revision
        #[arg(long, value_delimiter = ',')]
        authors: Option<Vec<usize>>,

        /// Author colours as `#rrggbb`
        #[arg(long, value_delimiter = ',')]
        colors: Option<Vec<Rgb>>,

        /// Print markers instead of ANSI styles
        #[arg(long)]
        no_color: bool,

        #[command(flatten)]
        diff: DiffArgs,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct DiffArgs {
    /// Compare changed words as whole lexemes only
    #[arg(long)]
    pub no_small_changes: bool,

    /// Edit distance below which a changed word is diffed by character
    #[arg(long, default_value_t = texdiff_core::diff::DEFAULT_SMALL_CHANGE_THRESHOLD)]
    pub threshold: usize,
}

impl DiffArgs {
    /// Diff configuration selected by these options
    pub const fn config(self) -> DiffConfig {
        DiffConfig {
            small_changes: !self.no_small_changes,
            small_change_threshold: self.threshold,
        }
    }
}

/// Parse one `--hide` category
fn parse_flag(label: &str) -> Result<ChangeFlags, String> {
    ChangeFlags::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = ChangeFlags::NAMES.iter().map(|(name, _)| *name).collect();
        format!("unknown category '{label}' (expected one of: {})", known.join(", "))
    })
}
