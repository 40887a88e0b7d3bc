//! Typed reporting facade over an [`EventSink`].
//!
//! Every `report_*` method checks the sink gate first and only then turns its
//! domain arguments into primitives. Each event id has a single private
//! emission function taking only strings, integers and booleans; the
//! `report_*` methods and their public `write_*` twins both end there.

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use http::StatusCode;

use crate::descriptor::{
    BEGIN_FETCH, END_FETCH, ERROR, EXCEPTION_FROM_SOURCE, EventDescriptor, FETCH_FAILED, INFO,
    WARNING,
};
use crate::settings::ReporterSettings;
use crate::sink::{EventSink, NullSink, TracingSink};
use crate::value::EventValue;

/// Severity accepted by [`ConfigurationEvents::report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Event 1.
    Info,
    /// Event 2.
    Warning,
    /// Event 3.
    Error,
}

impl ReportLevel {
    /// Returns the descriptor emitted for this level.
    #[must_use]
    pub const fn descriptor(self) -> &'static EventDescriptor {
        match self {
            Self::Info => &INFO,
            Self::Warning => &WARNING,
            Self::Error => &ERROR,
        }
    }
}

/// Joins the textual form of each source with `", "`.
///
/// An empty sequence renders as the empty string. Pass `None::<T>` for an
/// absent sequence.
pub fn format_sources<I>(sources: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    sources
        .into_iter()
        .map(|source| source.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reporter for configuration diagnostics.
///
/// Cheap to clone; clones share the same sink. Construct one at startup and hand
/// it to every collaborator that reports events.
#[derive(Clone)]
pub struct ConfigurationEvents {
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for ConfigurationEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationEvents").finish_non_exhaustive()
    }
}

impl Default for ConfigurationEvents {
    fn default() -> Self {
        Self::tracing(ReporterSettings::default())
    }
}

impl ConfigurationEvents {
    /// Creates a reporter writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Creates a reporter backed by a [`TracingSink`].
    #[must_use]
    pub fn tracing(settings: ReporterSettings) -> Self {
        Self::new(Arc::new(TracingSink::new(settings)))
    }

    /// Creates a reporter that drops everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullSink))
    }

    /// Returns `true` when `descriptor` would currently be emitted.
    #[must_use]
    pub fn is_enabled(&self, descriptor: &EventDescriptor) -> bool {
        self.sink.is_enabled(descriptor.level, descriptor.keywords)
    }

    fn emit(&self, descriptor: &'static EventDescriptor, payload: &[EventValue]) {
        // Diagnostics never disturb the caller; a failed write is dropped.
        let _ = self.sink.write(descriptor, payload);
    }

    fn emit_message(&self, descriptor: &'static EventDescriptor, source: &str, message: &str) {
        self.emit(descriptor, &[source.into(), message.into()]);
    }

    fn emit_begin_fetch(&self, source: &str) {
        self.emit(&BEGIN_FETCH, &[source.into()]);
    }

    fn emit_end_fetch(&self, source: &str, updated: bool) {
        self.emit(&END_FETCH, &[source.into(), updated.into()]);
    }

    fn emit_fetch_failed(&self, source: &str, status_code: i32, reason_phrase: &str) {
        self.emit(
            &FETCH_FAILED,
            &[source.into(), status_code.into(), reason_phrase.into()],
        );
    }

    fn emit_exception(&self, source: &str, exception_type: &str, exception_message: &str) {
        self.emit(
            &EXCEPTION_FROM_SOURCE,
            &[
                source.into(),
                exception_type.into(),
                exception_message.into(),
            ],
        );
    }

    /// Reports a message about a set of sources at the given level.
    pub fn report<I>(&self, level: ReportLevel, sources: I, message: &str)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let descriptor = level.descriptor();
        if self.is_enabled(descriptor) {
            self.emit_message(descriptor, &format_sources(sources), message);
        }
    }

    /// Reports an informational message about a set of sources.
    pub fn report_info<I>(&self, sources: I, message: &str)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.report(ReportLevel::Info, sources, message);
    }

    /// Reports a warning about a set of sources.
    pub fn report_warning<I>(&self, sources: I, message: &str)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.report(ReportLevel::Warning, sources, message);
    }

    /// Reports an error about a set of sources.
    pub fn report_error<I>(&self, sources: I, message: &str)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.report(ReportLevel::Error, sources, message);
    }

    /// Reports that a fetch from `source` is starting.
    pub fn report_begin_fetch(&self, source: &impl Display) {
        if self.is_enabled(&BEGIN_FETCH) {
            self.emit_begin_fetch(&source.to_string());
        }
    }

    /// Reports that a fetch from `source` finished; `updated` is `true` when the
    /// content differed from what was previously held.
    pub fn report_end_fetch(&self, source: &impl Display, updated: bool) {
        if self.is_enabled(&END_FETCH) {
            self.emit_end_fetch(&source.to_string(), updated);
        }
    }

    /// Reports a fetch that completed with a non-success status.
    pub fn report_fetch_failed(
        &self,
        source: &impl Display,
        status: StatusCode,
        reason_phrase: &str,
    ) {
        if self.is_enabled(&FETCH_FAILED) {
            self.emit_fetch_failed(
                &source.to_string(),
                i32::from(status.as_u16()),
                reason_phrase,
            );
        }
    }

    /// Reports an unhandled fault raised while contacting `source`.
    ///
    /// Only the fault's type name and message reach the sink. The type name is
    /// that of the static type `E`: a fault behind `Box<dyn Error + Send + Sync>`
    /// reports the trait-object name, not the concrete error. Downcast first, or
    /// call [`write_exception`](Self::write_exception) with an explicit name, when
    /// the concrete category matters.
    pub fn report_exception<E>(&self, source: &impl Display, error: &E)
    where
        E: StdError + ?Sized,
    {
        if self.is_enabled(&EXCEPTION_FROM_SOURCE) {
            self.emit_exception(
                &source.to_string(),
                std::any::type_name::<E>(),
                &error.to_string(),
            );
        }
    }

    /// Emits event 1 from pre-rendered arguments.
    pub fn write_info(&self, source: &str, message: &str) {
        self.write_message(&INFO, source, message);
    }

    /// Emits event 2 from pre-rendered arguments.
    pub fn write_warning(&self, source: &str, message: &str) {
        self.write_message(&WARNING, source, message);
    }

    /// Emits event 3 from pre-rendered arguments.
    pub fn write_error(&self, source: &str, message: &str) {
        self.write_message(&ERROR, source, message);
    }

    fn write_message(&self, descriptor: &'static EventDescriptor, source: &str, message: &str) {
        if self.is_enabled(descriptor) {
            self.emit_message(descriptor, source, message);
        }
    }

    /// Emits event 10 from a pre-rendered source.
    pub fn write_begin_fetch(&self, source: &str) {
        if self.is_enabled(&BEGIN_FETCH) {
            self.emit_begin_fetch(source);
        }
    }

    /// Emits event 11 from a pre-rendered source.
    pub fn write_end_fetch(&self, source: &str, updated: bool) {
        if self.is_enabled(&END_FETCH) {
            self.emit_end_fetch(source, updated);
        }
    }

    /// Emits event 12 from pre-rendered arguments.
    pub fn write_fetch_failed(&self, source: &str, status_code: i32, reason_phrase: &str) {
        if self.is_enabled(&FETCH_FAILED) {
            self.emit_fetch_failed(source, status_code, reason_phrase);
        }
    }

    /// Emits event 20 from pre-rendered arguments.
    pub fn write_exception(&self, source: &str, exception_type: &str, exception_message: &str) {
        if self.is_enabled(&EXCEPTION_FROM_SOURCE) {
            self.emit_exception(source, exception_type, exception_message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use config_primitives::ConfigurationSource;

    use super::*;
    use crate::level::EventLevel;
    use crate::sink::CollectingSink;

    /// Source whose rendering is observable.
    struct CountingSource<'a>(&'a AtomicUsize);

    impl Display for CountingSource<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fetch_add(1, Ordering::SeqCst);
            f.write_str("counted")
        }
    }

    fn source(location: &str) -> ConfigurationSource {
        ConfigurationSource::new(location).unwrap()
    }

    #[test]
    fn format_sources_joins_in_order() {
        let sources = [source("https://a/1"), source("https://b/2"), source("inline")];
        assert_eq!(format_sources(&sources), "https://a/1, https://b/2, inline");
        assert_eq!(format_sources([source("only")]), "only");
    }

    #[test]
    fn format_sources_empty_or_absent() {
        assert_eq!(format_sources(Vec::<ConfigurationSource>::new()), "");
        assert_eq!(format_sources(None::<ConfigurationSource>), "");
    }

    #[test]
    fn report_routes_by_level() {
        let sink = CollectingSink::new(EventLevel::Informational);
        let events = ConfigurationEvents::new(sink.clone());

        events.report_info([source("a"), source("b")], "loaded");
        events.report_warning(None::<&str>, "no sources");
        events.report_error(["x"], "bad");

        let recorded = sink.drain();
        let ids: Vec<u16> = recorded.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            recorded[0].payload,
            vec![EventValue::from("a, b"), EventValue::from("loaded")]
        );
        assert_eq!(recorded[1].payload[0], EventValue::from(""));
    }

    #[test]
    fn disabled_level_skips_formatting_and_write() {
        let sink = CollectingSink::new(EventLevel::Error);
        let events = ConfigurationEvents::new(sink.clone());
        let renders = AtomicUsize::new(0);

        events.report_info([CountingSource(&renders)], "ignored");
        events.report_warning([CountingSource(&renders)], "ignored");
        events.report_begin_fetch(&CountingSource(&renders));
        events.report_end_fetch(&CountingSource(&renders), true);
        events.report_fetch_failed(&CountingSource(&renders), StatusCode::NOT_FOUND, "Not Found");
        events.report_exception(
            &CountingSource(&renders),
            &std::io::Error::other("boom"),
        );

        assert_eq!(renders.load(Ordering::SeqCst), 0);
        assert_eq!(sink.writes(), 0);

        events.report_error([CountingSource(&renders)], "kept");
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(sink.writes(), 1);
    }

    #[test]
    fn fetch_failed_records_plain_status() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        let events = ConfigurationEvents::new(sink.clone());

        events.report_fetch_failed(&source("https://cfg/x"), StatusCode::NOT_FOUND, "Not Found");

        let recorded = sink.drain();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].id, 12);
        assert_eq!(recorded[0].level, EventLevel::Warning);
        assert_eq!(
            recorded[0].payload,
            vec![
                EventValue::from("https://cfg/x"),
                EventValue::Int(404),
                EventValue::from("Not Found"),
            ]
        );
    }

    #[test]
    fn exception_is_decomposed() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        let events = ConfigurationEvents::new(sink.clone());
        let fault = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer reset");

        events.report_exception(&source("https://cfg/x"), &fault);

        let recorded = sink.drain();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].id, 20);
        assert_eq!(
            recorded[0].payload[1].as_str(),
            Some(std::any::type_name::<std::io::Error>())
        );
        assert_eq!(recorded[0].payload[2].as_str(), Some("peer reset"));
    }

    #[test]
    fn boxed_exception_reports_trait_object_name() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        let events = ConfigurationEvents::new(sink.clone());
        let fault: Box<dyn StdError + Send + Sync> =
            Box::new(std::io::Error::other("socket closed"));

        events.report_exception(&source("https://cfg/x"), &*fault);

        let recorded = sink.drain();
        assert_eq!(
            recorded[0].payload[1].as_str(),
            Some(std::any::type_name::<dyn StdError + Send + Sync>())
        );
        assert_ne!(
            recorded[0].payload[1].as_str(),
            Some(std::any::type_name::<std::io::Error>())
        );
        assert_eq!(recorded[0].payload[2].as_str(), Some("socket closed"));
    }

    #[test]
    fn typed_and_primitive_paths_record_identically() {
        let typed_sink = CollectingSink::new(EventLevel::Verbose);
        let typed = ConfigurationEvents::new(typed_sink.clone());
        let primitive_sink = CollectingSink::new(EventLevel::Verbose);
        let primitive = ConfigurationEvents::new(primitive_sink.clone());
        let src = source("https://cfg/x");
        let fault = std::io::Error::other("reset");
        let fault_type = std::any::type_name::<std::io::Error>();

        typed.report_info([&src, &src], "m");
        typed.report_warning([&src], "m");
        typed.report_error(None::<&str>, "m");
        typed.report_begin_fetch(&src);
        typed.report_end_fetch(&src, true);
        typed.report_fetch_failed(&src, StatusCode::BAD_GATEWAY, "Bad Gateway");
        typed.report_exception(&src, &fault);

        primitive.write_info("https://cfg/x, https://cfg/x", "m");
        primitive.write_warning("https://cfg/x", "m");
        primitive.write_error("", "m");
        primitive.write_begin_fetch("https://cfg/x");
        primitive.write_end_fetch("https://cfg/x", true);
        primitive.write_fetch_failed("https://cfg/x", 502, "Bad Gateway");
        primitive.write_exception("https://cfg/x", fault_type, "reset");

        let typed = typed_sink.drain();
        assert_eq!(typed.len(), 7);
        assert_eq!(typed, primitive_sink.drain());
    }

    #[test]
    fn fetch_lifecycle_is_verbose() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        let events = ConfigurationEvents::new(sink.clone());
        let src = source("https://cfg/x");

        events.report_begin_fetch(&src);
        events.report_end_fetch(&src, false);

        let recorded = sink.drain();
        assert_eq!(recorded[0].id, 10);
        assert_eq!(recorded[0].payload, vec![EventValue::from("https://cfg/x")]);
        assert_eq!(recorded[1].id, 11);
        assert_eq!(recorded[1].payload[1], EventValue::Bool(false));
        assert!(recorded.iter().all(|e| e.level == EventLevel::Verbose));
    }

    #[test]
    fn primitive_writers_match_ids() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        let events = ConfigurationEvents::new(sink.clone());

        events.write_info("s", "m");
        events.write_warning("s", "m");
        events.write_error("s", "m");
        events.write_begin_fetch("s");
        events.write_end_fetch("s", true);
        events.write_fetch_failed("s", 500, "Internal Server Error");
        events.write_exception("s", "Timeout", "timed out");

        let ids: Vec<u16> = sink.drain().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 10, 11, 12, 20]);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let sink = CollectingSink::new(EventLevel::Verbose);
        sink.reject_writes(true);
        let events = ConfigurationEvents::new(sink.clone());

        events.report_error(["s"], "still fine");
        events.write_fetch_failed("s", 503, "Service Unavailable");

        assert_eq!(sink.writes(), 2);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn disabled_reporter_is_silent() {
        let events = ConfigurationEvents::disabled();
        assert!(!events.is_enabled(&ERROR));
        events.report_error(["s"], "dropped");
    }
}
