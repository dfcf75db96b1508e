//! Editor features for `.hurl` files
//!
//! This module provides the editor-facing features as plain functions:
//! - CodeLens with a "Run Hurl File" action on every request line
//! - Hover tooltips showing the value of `{{variable}}` placeholders
//!
//! The LSP server in `lsp_server` registers them against the editor.

pub mod codelens;
pub mod hover;

pub use codelens::{provide_code_lens, CodeLens, Command, Position, Range};
pub use hover::{provide_hover, EnvironmentSettings, Hover};
