//! Hurler: `.hurl` file support for the Zed editor
//!
//! This extension helps authors of `.hurl` files (the plain-text request
//! format of the `hurl` command-line tool). It runs the current file through
//! `hurl`, marks every request line with a "Run Hurl File" lens, and shows the
//! value of `{{variable}}` placeholders on hover.
//!
//! # Architecture
//!
//! - **classifier**: recognizes request lines and `{{variable}}` placeholders
//! - **variables**: looks placeholders up in a flat `key=value` file
//! - **language_server**: code lens and hover providers as plain functions
//! - **runner**: builds the `hurl` command line and dispatches it
//! - **config**: the `environmentFile` / `additionalArgs` settings
//! - **lsp_server** (feature `lsp`): tower-lsp server wiring it all to the editor
//!
//! # Settings
//!
//! ```json
//! {
//!   "lsp": {
//!     "hurler-lsp": {
//!       "settings": {
//!         "hurler": {
//!           "environmentFile": "env/dev.env",
//!           "additionalArgs": "--very-verbose"
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! `environmentFile` is passed to `hurl --variables-file` and used for hover
//! lookups; relative paths are resolved against the workspace root.

use zed_extension_api::{self as zed, settings::LspSettings};

pub mod classifier;
pub mod config;
pub mod language_server;
#[cfg(feature = "lsp")]
pub mod lsp_server;
pub mod runner;
pub mod variables;

/// Name of the language server binary.
const LSP_BINARY_NAME: &str = "hurler-lsp";

/// Hurler extension for Zed.
///
/// The extension itself only launches the language server; all editor
/// features live in the server.
struct HurlerExtension;

impl HurlerExtension {
    /// Reads the user's `lsp.hurler-lsp.settings` for this worktree.
    fn user_settings(
        language_server_id: &zed::LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Option<zed::serde_json::Value> {
        LspSettings::for_worktree(language_server_id.as_ref(), worktree)
            .ok()
            .and_then(|settings| settings.settings)
    }
}

impl zed::Extension for HurlerExtension {
    fn new() -> Self {
        Self
    }

    fn language_server_command(
        &mut self,
        _language_server_id: &zed::LanguageServerId,
        worktree: &zed::Worktree,
    ) -> zed::Result<zed::Command> {
        let binary_name = if cfg!(target_os = "windows") {
            format!("{}.exe", LSP_BINARY_NAME)
        } else {
            LSP_BINARY_NAME.to_string()
        };

        // Prefer a server on PATH, then the one shipped next to extension.wasm
        let command = worktree
            .which(&binary_name)
            .unwrap_or_else(|| format!("./{}", binary_name));

        Ok(zed::Command {
            command,
            args: vec![],
            env: vec![],
        })
    }

    fn language_server_initialization_options(
        &mut self,
        language_server_id: &zed::LanguageServerId,
        worktree: &zed::Worktree,
    ) -> zed::Result<Option<zed::serde_json::Value>> {
        Ok(Self::user_settings(language_server_id, worktree))
    }

    fn language_server_workspace_configuration(
        &mut self,
        language_server_id: &zed::LanguageServerId,
        worktree: &zed::Worktree,
    ) -> zed::Result<Option<zed::serde_json::Value>> {
        Ok(Self::user_settings(language_server_id, worktree))
    }
}

zed::register_extension!(HurlerExtension);
