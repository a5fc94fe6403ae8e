//! texdiff command-line front end
//!
//! `texdiff diff OLD NEW` lists the changes between two revisions.
//! `texdiff annotate REV...` folds a history into one annotated text.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use texdiff_core::{ChangeFlags, DiffConfig, LexicalDiff};
use texdiff_editor::{AccumulateConfig, Accumulator};

mod cli;
mod render;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Diff { old, new, diff } => run_diff(&old, &new, diff.config(), cli.json)?,
        Commands::Annotate {
            revisions,
            hide,
            authors,
            colors,
            no_color,
            diff,
        } => {
            let hide = hide.into_iter().fold(ChangeFlags::empty(), |acc, f| acc | f);
            let config = AccumulateConfig::default()
                .with_diff(diff.config())
                .with_hide(hide)
                .with_author_colors(colors.unwrap_or_default());
            run_annotate(&revisions, authors.as_deref(), config, cli.json, no_color)?
        }
    };
    print!("{output}");
    Ok(())
}

/// Route `log` records to stderr; `RUST_LOG` overrides `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Read a revision file
fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Diff two files and format the change list
fn run_diff(old: &Path, new: &Path, config: DiffConfig, json: bool) -> Result<String> {
    let old_text = read(old)?;
    let new_text = read(new)?;
    let changes = LexicalDiff::new(config)
        .diff(&old_text, &new_text)
        .with_context(|| format!("Failed to diff {} against {}", old.display(), new.display()))?;
    log::info!("{} change(s)", changes.len());

    if json {
        let mut out = serde_json::to_string_pretty(&changes).context("Failed to encode changes")?;
        out.push('\n');
        Ok(out)
    } else {
        render::change_list(&changes, &new_text)
    }
}

/// Accumulate revision files and format the annotated text
fn run_annotate(
    revisions: &[PathBuf],
    authors: Option<&[usize]>,
    config: AccumulateConfig,
    json: bool,
    no_color: bool,
) -> Result<String> {
    let accumulator = Accumulator::new(config);
    let mut report = |fraction: f32| log::debug!("progress {:.0}%", fraction * 100.0);
    let (text, chunks) = accumulator
        .accumulate_with_progress(revisions, authors, &mut report)
        .context("Failed to accumulate revisions")?;
    log::info!(
        "{} revision(s), {} styled chunk(s), palette of {}",
        revisions.len(),
        chunks.len(),
        accumulator.config().author_colors.len()
    );

    if json {
        let annotated = render::Annotated {
            text: &text,
            chunks: &chunks,
        };
        let mut out =
            serde_json::to_string_pretty(&annotated).context("Failed to encode annotation")?;
        out.push('\n');
        Ok(out)
    } else if no_color {
        render::markers(&text, &chunks)
    } else {
        render::ansi(&text, &chunks)
    }
}
