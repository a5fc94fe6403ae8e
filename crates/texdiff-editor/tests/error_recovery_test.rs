//! Error handling tests for the accumulation engine
//!
//! Unreadable revisions, cancellation and invalid configuration.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use texdiff_editor::*;

#[test]
fn unreadable_revision_reports_its_index() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.tex");
    let last = dir.path().join("c.tex");
    std::fs::write(&first, "one").unwrap();
    std::fs::write(&last, "one two three").unwrap();
    let revisions: Vec<PathBuf> = vec![first, dir.path().join("missing.tex"), last];

    let err = accumulate(&revisions, None, ChangeFlags::empty()).unwrap_err();
    assert!(matches!(err, EditorError::RevisionRead { index: 1, .. }));
    assert!(err.is_recoverable());
}

#[test]
fn unreadable_newest_revision_fails_first() {
    let revisions = [
        PathBuf::from("/nonexistent/texdiff/old.tex"),
        PathBuf::from("/nonexistent/texdiff/new.tex"),
    ];
    let err = accumulate(&revisions, None, ChangeFlags::empty()).unwrap_err();
    assert!(matches!(err, EditorError::RevisionRead { index: 1, .. }));
}

#[test]
fn mixed_sources() {
    let stream = ReaderRevision::new(Cursor::new("alpha beta gamma"));
    let revisions: Vec<&dyn RevisionSource> = vec![&"alpha gamma", &stream];
    let (text, chunks) = accumulate(&revisions, None, ChangeFlags::empty()).unwrap();
    assert_eq!(text, "alpha beta gamma");
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].start, chunks[0].end), (6, 11));
}

#[test]
fn cancelled_before_first_step() {
    let flag = Arc::new(AtomicBool::new(true));
    let accumulator = Accumulator::default().with_cancel_flag(Arc::clone(&flag));
    let err = accumulator.accumulate(&["a", "a b"], None).unwrap_err();
    assert_eq!(err, EditorError::Cancelled { completed: 0 });

    // a single revision needs no pairwise step
    let (text, _) = accumulator.accumulate(&["a"], None).unwrap();
    assert_eq!(text, "a");
}

#[test]
fn cancelled_between_steps() {
    let flag = Arc::new(AtomicBool::new(false));
    let accumulator = Accumulator::default().with_cancel_flag(Arc::clone(&flag));
    let mut listener = |_: f32| flag.store(true, Ordering::Relaxed);
    let err = accumulator
        .accumulate_with_progress(&["a", "a b", "a b c"], None, &mut listener)
        .unwrap_err();
    assert_eq!(err, EditorError::Cancelled { completed: 1 });
}

#[test]
fn invalid_threshold_is_a_config_error() {
    let config =
        AccumulateConfig::default().with_diff(DiffConfig::default().with_threshold(0));
    assert!(config.validate().is_err());
    let err = Accumulator::new(config)
        .accumulate(&["a"], None)
        .unwrap_err();
    assert!(matches!(err, EditorError::Core(_)));
}

#[test]
fn attributed_text_rejects_bad_offsets() {
    let mut text = AttributedText::from_text("short");
    let attribute = Attribute::addition(0, None, ChangeFlags::empty());
    assert!(text.insert(6, "x", attribute).unwrap_err().is_position_error());
    assert!(text.set_style_if_plain(3, 3, attribute).unwrap_err().is_position_error());
    assert!(text.is_deletion(5).is_err());
    assert_eq!(text.text(), "short");
}
