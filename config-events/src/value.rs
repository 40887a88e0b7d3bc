//! Serialization-ready event arguments.

use std::fmt::{self, Display, Formatter};

/// Primitive argument handed to a sink. Rich domain types never cross the
/// sink boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventValue {
    /// Text argument.
    Str(String),
    /// Integer argument.
    Int(i32),
    /// Boolean argument.
    Bool(bool),
}

impl EventValue {
    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for EventValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => Display::fmt(value, f),
            Self::Bool(value) => Display::fmt(value, f),
        }
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for EventValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
