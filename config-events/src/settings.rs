//! Reporter settings.

use std::env;

use serde::{Deserialize, Serialize};

use crate::level::{EventKeywords, EventLevel};
use crate::EventsResult;

/// Environment variable toggling emission on or off.
pub const ENV_ENABLED: &str = "CONFIG_EVENTS_ENABLED";
/// Environment variable holding the maximum emitted level.
pub const ENV_LEVEL: &str = "CONFIG_EVENTS_LEVEL";

/// Gate applied by [`TracingSink`](crate::TracingSink) before consulting the
/// active subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterSettings {
    /// Master switch.
    pub enabled: bool,
    /// Most verbose level that is emitted.
    pub level: EventLevel,
    /// Category filter; [`EventKeywords::NONE`] admits everything.
    pub keywords: EventKeywords,
}

impl Default for ReporterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: EventLevel::Informational,
            keywords: EventKeywords::NONE,
        }
    }
}

impl ReporterSettings {
    /// Settings with emission switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Overrides the maximum level.
    #[must_use]
    pub const fn with_level(mut self, level: EventLevel) -> Self {
        self.level = level;
        self
    }

    /// Overrides the keyword filter.
    #[must_use]
    pub const fn with_keywords(mut self, keywords: EventKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Decodes settings from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::InvalidSettings`](crate::EventsError::InvalidSettings)
    /// when the document does not decode.
    pub fn from_json(raw: &str) -> EventsResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads settings from [`ENV_ENABLED`] and [`ENV_LEVEL`], falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::UnknownLevel`](crate::EventsError::UnknownLevel)
    /// when the level variable names no known level.
    pub fn from_env() -> EventsResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EventsResult<Self> {
        let mut settings = Self::default();
        if let Some(raw) = lookup(ENV_ENABLED) {
            settings.enabled = !matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }
        if let Some(raw) = lookup(ENV_LEVEL) {
            settings.level = raw.parse()?;
        }
        Ok(settings)
    }

    /// Returns `true` when an event with the given level and keywords passes.
    #[must_use]
    pub fn admits(&self, level: EventLevel, keywords: EventKeywords) -> bool {
        self.enabled && level.admitted_by(self.level) && keywords.matches(self.keywords)
    }
}
