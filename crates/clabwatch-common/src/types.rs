//! Domain primitive types used across the clabwatch workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a container, derived from the event stream.
///
/// Events may carry an explicit `state` attribute outside the known set;
/// such values are preserved verbatim in [`ContainerState::Other`] rather
/// than being dropped or coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerState {
    /// Container has been created but not yet started.
    Created,
    /// Container is actively running.
    Running,
    /// Container has been paused.
    Paused,
    /// Container has exited.
    Exited,
    /// A state string outside the known set, kept verbatim.
    Other(String),
}

impl ContainerState {
    /// Parses an explicit state string from an event attribute.
    ///
    /// Returns `None` for empty input; unknown non-empty values are kept
    /// verbatim in [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "created" => Some(Self::Created),
            "running" => Some(Self::Running),
            "paused" => Some(Self::Paused),
            "exited" => Some(Self::Exited),
            other => Some(Self::Other(other.to_owned())),
        }
    }

    /// Derives the implied state from a container action.
    ///
    /// Actions outside the fixed mapping imply no state change.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "start" | "unpause" | "restart" => Some(Self::Running),
            "create" => Some(Self::Created),
            "stop" | "kill" | "die" => Some(Self::Exited),
            "pause" => Some(Self::Paused),
            _ => None,
        }
    }

    /// Returns the wire-format string for this state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Exited => "exited",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for ContainerState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContainerState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| serde::de::Error::custom("container state must be non-empty"))
    }
}

/// Link state of a network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// Interface is up.
    Up,
    /// Interface is down.
    #[default]
    Down,
}

impl LinkState {
    /// Parses a link state string case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("up") {
            Some(Self::Up)
        } else if value.eq_ignore_ascii_case("down") {
            Some(Self::Down)
        } else {
            None
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.pad("up"),
            Self::Down => f.pad("down"),
        }
    }
}
