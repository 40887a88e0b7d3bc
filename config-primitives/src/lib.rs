//! Core shared types for the MetricSystem configuration subsystem.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod source;

/// Error type and result alias shared across the configuration crates.
pub use error::{Error, Result};
/// Opaque identifier for a configuration origin.
pub use source::{ConfigurationSource, SourceKind};
