//! Severity levels and keyword masks used to gate event emission.

use std::fmt::{self, Display, Formatter};
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EventsError;

/// Severity of an event. Larger values are more verbose.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EventLevel {
    /// Emitted whenever the sink is enabled at all.
    LogAlways = 0,
    /// Unrecoverable faults.
    Critical = 1,
    /// Failures the caller could not work around.
    Error = 2,
    /// Recoverable problems worth surfacing.
    Warning = 3,
    /// Normal operational messages.
    #[default]
    Informational = 4,
    /// Fine-grained lifecycle detail.
    Verbose = 5,
}

impl EventLevel {
    /// Every level, from least to most verbose.
    pub const ALL: [Self; 6] = [
        Self::LogAlways,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Informational,
        Self::Verbose,
    ];

    /// Returns the lowercase name used in settings and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogAlways => "logalways",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Informational => "informational",
            Self::Verbose => "verbose",
        }
    }

    /// Returns `true` when an event at `self` passes a sink enabled up to `max`.
    #[must_use]
    pub fn admitted_by(self, max: Self) -> bool {
        self == Self::LogAlways || self <= max
    }

    /// Maps the level onto the closest `tracing` level.
    #[must_use]
    pub const fn to_tracing(self) -> tracing::Level {
        match self {
            Self::Critical | Self::Error => tracing::Level::ERROR,
            Self::Warning => tracing::Level::WARN,
            Self::LogAlways | Self::Informational => tracing::Level::INFO,
            Self::Verbose => tracing::Level::DEBUG,
        }
    }
}

impl Display for EventLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventLevel {
    type Err = EventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logalways" | "always" => Ok(Self::LogAlways),
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "informational" | "info" => Ok(Self::Informational),
            "verbose" | "debug" => Ok(Self::Verbose),
            _ => Err(EventsError::UnknownLevel {
                name: s.to_owned(),
            }),
        }
    }
}

/// Bitmask of event categories.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKeywords(u64);

impl EventKeywords {
    /// No category; matches every filter.
    pub const NONE: Self = Self(0);

    /// Creates a keyword mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns `true` when no bits are set.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when an event tagged `self` passes the `filter` mask.
    #[must_use]
    pub const fn matches(self, filter: Self) -> bool {
        self.is_none() || filter.is_none() || self.0 & filter.0 != 0
    }
}

impl BitOr for EventKeywords {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
