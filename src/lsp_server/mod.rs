//! LSP server module for the Hurler extension
//!
//! This module provides the Language Server Protocol implementation
//! for .hurl files: code lenses that run the file, hover information for
//! variables, and the `hurler.runHurl` command.

pub mod backend;
pub mod document;

pub use backend::Backend;
pub use document::{Document, DocumentManager};
