//! Structured diagnostic events for the configuration subsystem.
//!
//! Collaborators receive a [`ConfigurationEvents`] handle and report through it
//! without knowing whether anything is listening. Each event has a stable
//! numeric id (see [`descriptor`]) and is gated by its [`EventLevel`] before
//! any argument is formatted.

#![warn(missing_docs, clippy::pedantic)]

pub mod descriptor;
mod error;
mod level;
mod reporter;
mod settings;
mod sink;
mod value;

pub use descriptor::{ALL_EVENTS, EVENT_SOURCE, EventDescriptor, EventSourceIdentity};
pub use error::{EventsError, EventsResult, SinkError};
pub use level::{EventKeywords, EventLevel};
pub use reporter::{ConfigurationEvents, ReportLevel, format_sources};
pub use settings::{ENV_ENABLED, ENV_LEVEL, ReporterSettings};
pub use sink::{CollectingSink, EventSink, NullSink, RecordedEvent, TracingSink};
pub use value::EventValue;
