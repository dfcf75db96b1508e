//! CodeLens provider for Hurler
//!
//! This module places a clickable "Run Hurl File" lens on every request line
//! of a `.hurl` document. The lens runs the whole file, so every lens in a
//! document triggers the same action.

use crate::classifier::{is_hurl_path, runnable_lines};
use std::path::Path;

/// Command identifier of the run action
pub const RUN_COMMAND: &str = "hurler.runHurl";

/// Title shown in every run lens
pub const RUN_TITLE: &str = "▶️ Run Hurl File";

/// Represents a position in a text document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based line number
    pub line: usize,
    /// Zero-based character offset in the line
    pub character: usize,
}

impl Position {
    /// Creates a new position
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Represents a range in a text document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Creates a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Represents a command that can be executed from a CodeLens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The command identifier
    pub command: String,
    /// Human-readable title shown in the lens
    pub title: String,
}

impl Command {
    /// Creates a new command
    pub fn new(command: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            title: title.into(),
        }
    }

    /// The parameterless run action
    pub fn run() -> Self {
        Self::new(RUN_COMMAND, RUN_TITLE)
    }
}

/// Represents a CodeLens in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLens {
    /// The range where the CodeLens should appear
    pub range: Range,
    /// The command to execute when clicked
    pub command: Command,
}

impl CodeLens {
    /// Creates a new CodeLens
    pub fn new(range: Range, command: Command) -> Self {
        Self { range, command }
    }
}

/// Provides a run lens for every request line of a `.hurl` document
///
/// Documents whose path does not end in `.hurl` get no lenses and are not
/// scanned.
///
/// # Arguments
/// * `document` - The full text of the document
/// * `path` - The document's file path
///
/// # Returns
/// One CodeLens per runnable line, in document order
///
/// # Examples
/// ```
/// use hurler::language_server::codelens::provide_code_lens;
/// use std::path::Path;
///
/// let doc = "GET https://example.com\nHTTP 200\n\nPOST https://example.com/users";
/// assert_eq!(provide_code_lens(doc, Path::new("/api/users.hurl")).len(), 2);
/// assert!(provide_code_lens(doc, Path::new("/api/users.http")).is_empty());
/// ```
pub fn provide_code_lens(document: &str, path: &Path) -> Vec<CodeLens> {
    if !is_hurl_path(path) {
        return Vec::new();
    }

    runnable_lines(document)
        .into_iter()
        .map(|found| {
            let range = Range::new(
                Position::new(found.line, found.start),
                Position::new(found.line, found.end),
            );
            CodeLens::new(range, Command::run())
        })
        .collect()
}
