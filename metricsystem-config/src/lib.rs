//! MetricSystem configuration SDK facade.
//!
//! Depend on this crate via `cargo add metricsystem-config`. It bundles the
//! configuration crates behind feature flags so downstream users only compile
//! what they report through.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use config_primitives as primitives;

/// Diagnostic event reporter (enabled by `events` feature).
#[cfg(feature = "events")]
pub use config_events as events;
