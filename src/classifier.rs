//! Line classification for `.hurl` documents
//!
//! This module recognizes the two line-level shapes the extension cares about:
//! request lines that start with an HTTP method (these get a "Run" lens) and
//! `{{name}}` placeholders (these get a hover with the variable's value).

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// File extension of documents handled by the extension.
pub const HURL_EXTENSION: &str = ".hurl";

/// Anchored, case-insensitive HTTP method followed by whitespace.
static METHOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS)\s").expect("valid method regex")
});

/// A placeholder body stops at the first `}`.
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("valid placeholder regex"));

/// A line that starts with an HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnableLineMatch {
    /// Zero-based line index in the document
    pub line: usize,
    /// Character column where the trimmed content starts
    pub start: usize,
    /// Character column one past the trimmed content
    pub end: usize,
}

/// A `{{name}}` token found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    /// Variable name with braces stripped and whitespace trimmed
    pub name: String,
    /// Character column of the opening `{{`
    pub start: usize,
    /// Character column one past the closing `}}`
    pub end: usize,
}

/// Returns true when the trimmed line starts with an HTTP method token
/// followed by whitespace.
///
/// # Examples
///
/// ```
/// use hurler::classifier::is_runnable_line;
///
/// assert!(is_runnable_line("  get https://example.com"));
/// assert!(!is_runnable_line("# GET https://example.com"));
/// assert!(!is_runnable_line("GET"));
/// ```
pub fn is_runnable_line(text: &str) -> bool {
    METHOD_PATTERN.is_match(text.trim())
}

/// Scans a document and returns every runnable line in document order.
pub fn runnable_lines(document: &str) -> Vec<RunnableLineMatch> {
    document
        .lines()
        .enumerate()
        .filter(|(_, line)| is_runnable_line(line))
        .map(|(line_num, line)| {
            let leading = line.chars().take_while(|c| c.is_whitespace()).count();
            let width = line.trim().chars().count();
            RunnableLineMatch {
                line: line_num,
                start: leading,
                end: leading + width,
            }
        })
        .collect()
}

/// Finds the placeholder whose span contains `position`.
///
/// `position` is a character column within `text`. Both delimiters count as
/// part of the span, so hovering the closing `}}` still resolves the token.
///
/// # Examples
///
/// ```
/// use hurler::classifier::find_placeholder_at;
///
/// let line = "Authorization: {{token}}";
/// assert_eq!(find_placeholder_at(line, 18).unwrap().name, "token");
/// assert!(find_placeholder_at(line, 3).is_none());
/// ```
pub fn find_placeholder_at(text: &str, position: usize) -> Option<PlaceholderToken> {
    PLACEHOLDER_PATTERN.find_iter(text).find_map(|found| {
        let start = text[..found.start()].chars().count();
        let end = start + found.as_str().chars().count();

        if position < start || position > end {
            return None;
        }

        let raw = found.as_str();
        let name = raw[2..raw.len() - 2].trim().to_string();
        Some(PlaceholderToken { name, start, end })
    })
}

/// Returns true when the path names a `.hurl` document.
pub fn is_hurl_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(HURL_EXTENSION))
}
