//! Variable hover provider for Hurler
//!
//! This module shows the value of a `{{variable}}` placeholder when the cursor
//! rests on it, looking the name up in the configured definitions file.

use crate::classifier::find_placeholder_at;
use crate::variables::{resolve, ResolutionOutcome};
use std::path::PathBuf;

use super::{Position, Range};

/// Hover payload: a bold header naming the variable and a body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    /// Markdown header, `**name**`
    pub header: String,

    /// Markdown body describing the lookup result
    pub body: String,

    /// Range of the placeholder the hover applies to
    pub range: Option<Range>,
}

impl Hover {
    /// Creates a hover from its two parts
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
            range: None,
        }
    }

    /// Attaches the range the hover applies to
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}

/// Settings the hover lookup depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSettings {
    /// The `environmentFile` setting; empty when not configured
    pub environment_file: String,

    /// Workspace root used for relative settings; empty when unknown
    pub base_path: PathBuf,
}

impl EnvironmentSettings {
    /// Creates settings from the `environmentFile` value and workspace root
    pub fn new(environment_file: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            environment_file: environment_file.into(),
            base_path: base_path.into(),
        }
    }
}

/// Provides hover information for the placeholder at `position`
///
/// # Arguments
/// * `document` - The full text of the document
/// * `position` - The cursor position in the document
/// * `settings` - Definitions file setting and workspace root
///
/// # Returns
/// Hover information if the cursor is over a placeholder, None otherwise
///
/// # Examples
/// ```
/// use hurler::language_server::{provide_hover, EnvironmentSettings, Position};
///
/// let doc = "GET {{host}}/users";
/// let hover = provide_hover(doc, Position::new(0, 6), &EnvironmentSettings::default()).unwrap();
/// assert_eq!(hover.header, "**host**");
/// assert_eq!(hover.body, "*No environment file configured*");
/// ```
pub fn provide_hover(
    document: &str,
    position: Position,
    settings: &EnvironmentSettings,
) -> Option<Hover> {
    let line = document.lines().nth(position.line)?;
    let token = find_placeholder_at(line, position.character)?;

    let outcome = resolve(
        &token.name,
        &settings.environment_file,
        &settings.base_path,
    );

    let range = Range::new(
        Position::new(position.line, token.start),
        Position::new(position.line, token.end),
    );

    Some(Hover::new(format!("**{}**", token.name), format_hover_body(&outcome)).with_range(range))
}

/// Formats the body line for a lookup result
fn format_hover_body(outcome: &ResolutionOutcome) -> String {
    match outcome {
        ResolutionOutcome::Found(value) => format!("`{}`", value),
        ResolutionOutcome::NoEnvironmentConfigured => {
            "*No environment file configured*".to_string()
        }
        ResolutionOutcome::EnvironmentFileMissing(path) => {
            format!("*Environment file not found: {}*", path.display())
        }
        ResolutionOutcome::NotFound => "*Variable not found in environment file*".to_string(),
        ResolutionOutcome::ReadError(message) => {
            format!("*Error reading environment file: {}*", message)
        }
    }
}
