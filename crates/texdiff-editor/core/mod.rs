//! Core editor types: attributed text, character styles and errors

pub mod attributed;
pub mod errors;
pub mod style;

pub use attributed::AttributedText;
pub use errors::{EditorError, Result};
pub use style::{Attribute, Rgb, StyleChunk, StyleKind};
