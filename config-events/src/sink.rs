//! Destinations for emitted events.

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::SinkError;
use crate::descriptor::{EventDescriptor, TRACING_TARGET};
use crate::level::{EventKeywords, EventLevel};
use crate::settings::ReporterSettings;
use crate::value::EventValue;

/// Underlying mechanism that stores or transmits events.
///
/// Implementations synchronize internally; the reporter shares one sink across
/// threads without extra locking.
pub trait EventSink: Send + Sync {
    /// Returns `true` when an event with the given level and keywords would be
    /// kept. Must be cheap; it runs before any argument formatting.
    fn is_enabled(&self, level: EventLevel, keywords: EventKeywords) -> bool;

    /// Writes one event. `payload` follows `descriptor.fields` order.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the event could not be delivered.
    fn write(
        &self,
        descriptor: &'static EventDescriptor,
        payload: &[EventValue],
    ) -> Result<(), SinkError>;
}

/// Renders a payload as `name=value` pairs in descriptor order.
struct Fields<'a> {
    names: &'static [&'static str],
    values: &'a [EventValue],
}

impl Display for Fields<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.names.iter().zip(self.values).enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match value {
                EventValue::Str(text) => write!(f, "{name}={text:?}")?,
                other => write!(f, "{name}={other}")?,
            }
        }
        Ok(())
    }
}

// The macros need a constant level, so branch on the mapped tracing level.
fn subscriber_enabled(level: EventLevel) -> bool {
    match level.to_tracing() {
        Level::ERROR => tracing::enabled!(target: TRACING_TARGET, Level::ERROR),
        Level::WARN => tracing::enabled!(target: TRACING_TARGET, Level::WARN),
        Level::INFO => tracing::enabled!(target: TRACING_TARGET, Level::INFO),
        Level::DEBUG => tracing::enabled!(target: TRACING_TARGET, Level::DEBUG),
        _ => tracing::enabled!(target: TRACING_TARGET, Level::TRACE),
    }
}

macro_rules! emit_event {
    ($level:expr, $descriptor:expr, $fields:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            event_id = $descriptor.id,
            event_name = $descriptor.name,
            event_level = $descriptor.level.as_str(),
            payload = %$fields,
            "{}",
            $descriptor.name
        )
    };
}

/// Sink that forwards events to the active `tracing` subscriber under the
/// `MetricSystem-Configuration` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    settings: ReporterSettings,
}

impl TracingSink {
    /// Creates a tracing sink gated by `settings`.
    #[must_use]
    pub const fn new(settings: ReporterSettings) -> Self {
        Self { settings }
    }

    /// Returns the gate applied before the subscriber is consulted.
    #[must_use]
    pub const fn settings(&self) -> ReporterSettings {
        self.settings
    }
}

impl EventSink for TracingSink {
    fn is_enabled(&self, level: EventLevel, keywords: EventKeywords) -> bool {
        self.settings.admits(level, keywords) && subscriber_enabled(level)
    }

    fn write(
        &self,
        descriptor: &'static EventDescriptor,
        payload: &[EventValue],
    ) -> Result<(), SinkError> {
        let fields = Fields {
            names: descriptor.fields,
            values: payload,
        };
        match descriptor.level.to_tracing() {
            Level::ERROR => emit_event!(Level::ERROR, descriptor, fields),
            Level::WARN => emit_event!(Level::WARN, descriptor, fields),
            Level::INFO => emit_event!(Level::INFO, descriptor, fields),
            Level::DEBUG => emit_event!(Level::DEBUG, descriptor, fields),
            _ => emit_event!(Level::TRACE, descriptor, fields),
        }
        Ok(())
    }
}

/// Sink that is never enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn is_enabled(&self, _level: EventLevel, _keywords: EventKeywords) -> bool {
        false
    }

    fn write(
        &self,
        _descriptor: &'static EventDescriptor,
        _payload: &[EventValue],
    ) -> Result<(), SinkError> {
        Err(SinkError::Unavailable)
    }
}

/// One write captured by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Event id.
    pub id: u16,
    /// Event name.
    pub name: &'static str,
    /// Event level.
    pub level: EventLevel,
    /// Arguments, in descriptor field order.
    pub payload: Vec<EventValue>,
}

/// Sink used during testing to capture events.
#[derive(Debug)]
pub struct CollectingSink {
    max_level: Option<EventLevel>,
    events: Mutex<Vec<RecordedEvent>>,
    writes: AtomicUsize,
    reject: AtomicBool,
}

impl CollectingSink {
    /// Creates a sink enabled up to and including `max_level`.
    #[must_use]
    pub fn new(max_level: EventLevel) -> Arc<Self> {
        Arc::new(Self::with_max_level(Some(max_level)))
    }

    /// Creates a sink that reports itself disabled at every level.
    #[must_use]
    pub fn disabled() -> Arc<Self> {
        Arc::new(Self::with_max_level(None))
    }

    fn with_max_level(max_level: Option<EventLevel>) -> Self {
        Self {
            max_level,
            events: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
            reject: AtomicBool::new(false),
        }
    }

    /// Makes subsequent writes fail with [`SinkError::Rejected`].
    pub fn reject_writes(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Returns the number of write attempts, including rejected ones.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns and clears the captured events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn drain(&self) -> Vec<RecordedEvent> {
        let mut lock = self.events.lock().expect("collecting sink poisoned");
        lock.drain(..).collect()
    }
}

impl EventSink for CollectingSink {
    fn is_enabled(&self, level: EventLevel, _keywords: EventKeywords) -> bool {
        self.max_level.is_some_and(|max| level.admitted_by(max))
    }

    fn write(
        &self,
        descriptor: &'static EventDescriptor,
        payload: &[EventValue],
    ) -> Result<(), SinkError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject.load(Ordering::SeqCst) {
            return Err(SinkError::rejected("collecting sink set to reject"));
        }
        self.events
            .lock()
            .map_err(|_| SinkError::Unavailable)?
            .push(RecordedEvent {
                id: descriptor.id,
                name: descriptor.name,
                level: descriptor.level,
                payload: payload.to_vec(),
            });
        Ok(())
    }
}
