//! Run action error types.
//!
//! Each variant is a notice shown to the user; it aborts the run that
//! raised it and leaves nothing to clean up.

use std::fmt;
use std::path::PathBuf;

/// Errors that abort a `hurl` run before or during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// No document is active in the editor.
    NoActiveDocument,

    /// The active document is not a `.hurl` file.
    NotHurlFile(PathBuf),

    /// The output artifact could not be created or truncated.
    ///
    /// No command is dispatched when this happens.
    OutputFile {
        /// Path of the `.out` artifact
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },

    /// The shell could not be started.
    Spawn(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::NoActiveDocument => write!(f, "No active editor found"),
            RunError::NotHurlFile(path) => {
                write!(f, "Active file is not a .hurl file: {}", path.display())
            }
            RunError::OutputFile { path, message } => write!(
                f,
                "Failed to create output file {}: {}",
                path.display(),
                message
            ),
            RunError::Spawn(msg) => write!(f, "Failed to start hurl: {}", msg),
        }
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RunError::NoActiveDocument.to_string(), "No active editor found");

        let not_hurl = RunError::NotHurlFile(PathBuf::from("/ws/api.http"));
        assert_eq!(
            not_hurl.to_string(),
            "Active file is not a .hurl file: /ws/api.http"
        );

        let output = RunError::OutputFile {
            path: PathBuf::from("/ws/api.hurl.out"),
            message: "Permission denied".to_string(),
        };
        assert_eq!(
            output.to_string(),
            "Failed to create output file /ws/api.hurl.out: Permission denied"
        );
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: &dyn std::error::Error = &RunError::Spawn("no shell".to_string());
        assert_eq!(format!("{}", err), "Failed to start hurl: no shell");
    }
}
