//! Variables module for Hurler
//!
//! This module resolves `{{variable}}` placeholders against the flat
//! `key=value` definitions file configured as `environmentFile`.

pub mod resolver;

pub use resolver::{lookup_definition, resolve, resolve_environment_path, ResolutionOutcome};
