//! Sources of revision text
//!
//! A revision can come from memory, from a file or from any reader. The
//! accumulator only needs the full text of each revision, read on demand.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Anything that can produce the text of one revision
pub trait RevisionSource {
    /// Read the full text of the revision
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the text cannot be read or is
    /// not valid UTF-8.
    fn read_text(&self) -> io::Result<String>;
}

impl RevisionSource for str {
    fn read_text(&self) -> io::Result<String> {
        Ok(self.to_owned())
    }
}

impl RevisionSource for String {
    fn read_text(&self) -> io::Result<String> {
        Ok(self.clone())
    }
}

impl RevisionSource for Path {
    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(self)
    }
}

impl RevisionSource for PathBuf {
    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(self)
    }
}

impl<T: RevisionSource + ?Sized> RevisionSource for &T {
    fn read_text(&self) -> io::Result<String> {
        (**self).read_text()
    }
}

impl<T: RevisionSource + ?Sized> RevisionSource for Box<T> {
    fn read_text(&self) -> io::Result<String> {
        (**self).read_text()
    }
}

/// A revision read from a reader
///
/// The reader is drained on first use. The text, or the error of that read,
/// is kept for later calls.
#[derive(Debug)]
pub struct ReaderRevision<R> {
    /// Reader, taken on the first read
    reader: RefCell<Option<R>>,
    /// Result of the first read; a failure keeps its kind and message
    outcome: OnceLock<Result<String, (io::ErrorKind, String)>>,
}

impl<R: Read> ReaderRevision<R> {
    /// Wrap a reader; nothing is read until the first `read_text`
    pub const fn new(reader: R) -> Self {
        Self {
            reader: RefCell::new(Some(reader)),
            outcome: OnceLock::new(),
        }
    }
}

impl<R: Read> RevisionSource for ReaderRevision<R> {
    fn read_text(&self) -> io::Result<String> {
        let outcome = self.outcome.get_or_init(|| {
            let mut text = String::new();
            match self.reader.borrow_mut().take() {
                Some(mut reader) => reader
                    .read_to_string(&mut text)
                    .map(|_| text)
                    .map_err(|e| (e.kind(), e.to_string())),
                None => Err((io::ErrorKind::UnexpectedEof, "reader already drained".to_string())),
            }
        });
        outcome
            .clone()
            .map_err(|(kind, message)| io::Error::new(kind, message))
    }
}
