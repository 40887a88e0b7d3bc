//! Stable event identities.
//!
//! Consumers parse the event stream by numeric id, so an id is never reused for
//! a different argument shape.

use std::fmt::{self, Display, Formatter};

use uuid::Uuid;

use crate::level::{EventKeywords, EventLevel};

/// Name and GUID under which every configuration event is published.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EventSourceIdentity {
    /// Provider name; also the `tracing` target of emitted events.
    pub name: &'static str,
    /// Stable provider GUID.
    pub guid: Uuid,
}

/// Identity of the configuration event provider.
pub const EVENT_SOURCE: EventSourceIdentity = EventSourceIdentity {
    name: TRACING_TARGET,
    guid: Uuid::from_u128(0x623e_2915_f18a_438f_b0d6_2969_c8fb_c877),
};

pub(crate) const TRACING_TARGET: &str = "MetricSystem-Configuration";

/// Compile-time description of one event kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EventDescriptor {
    /// Numeric id, unique within the provider.
    pub id: u16,
    /// Event name.
    pub name: &'static str,
    /// Severity used for gating.
    pub level: EventLevel,
    /// Category mask used for gating.
    pub keywords: EventKeywords,
    /// Argument names, in payload order.
    pub fields: &'static [&'static str],
}

impl Display for EventDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

const fn descriptor(
    id: u16,
    name: &'static str,
    level: EventLevel,
    fields: &'static [&'static str],
) -> EventDescriptor {
    EventDescriptor {
        id,
        name,
        level,
        keywords: EventKeywords::NONE,
        fields,
    }
}

/// General informational message about a set of sources.
pub const INFO: EventDescriptor =
    descriptor(1, "Info", EventLevel::Informational, &["source", "message"]);
/// General warning about a set of sources.
pub const WARNING: EventDescriptor =
    descriptor(2, "Warning", EventLevel::Warning, &["source", "message"]);
/// General error about a set of sources.
pub const ERROR: EventDescriptor =
    descriptor(3, "Error", EventLevel::Error, &["source", "message"]);
/// A fetch of configuration content is about to start.
pub const BEGIN_FETCH: EventDescriptor =
    descriptor(10, "BeginFetch", EventLevel::Verbose, &["source"]);
/// A fetch finished; `updated` tells whether the content changed.
pub const END_FETCH: EventDescriptor =
    descriptor(11, "EndFetch", EventLevel::Verbose, &["source", "updated"]);
/// A fetch returned a non-success status.
pub const FETCH_FAILED: EventDescriptor = descriptor(
    12,
    "FetchFailed",
    EventLevel::Warning,
    &["source", "statusCode", "reasonPhrase"],
);
/// An unhandled fault occurred while contacting a source.
pub const EXCEPTION_FROM_SOURCE: EventDescriptor = descriptor(
    20,
    "ExceptionFromSource",
    EventLevel::Warning,
    &["source", "exceptionType", "exceptionMessage"],
);

/// Every event the provider can emit.
pub const ALL_EVENTS: [&EventDescriptor; 7] = [
    &INFO,
    &WARNING,
    &ERROR,
    &BEGIN_FETCH,
    &END_FETCH,
    &FETCH_FAILED,
    &EXCEPTION_FROM_SOURCE,
];

/// Looks up a descriptor by numeric id.
#[must_use]
pub fn by_id(id: u16) -> Option<&'static EventDescriptor> {
    ALL_EVENTS.into_iter().find(|descriptor| descriptor.id == id)
}
