//! Shared error definitions for configuration primitives.

use thiserror::Error;

/// Result alias used throughout the configuration crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating configuration primitive types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A configuration source was constructed from an empty location.
    #[error("configuration source location must not be empty")]
    EmptySource,
}
