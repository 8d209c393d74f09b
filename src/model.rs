//! Friend record data model.
//!
//! DESIGN
//! ======
//! The record always holds exactly two profiles, one per [`Slot`]. It is a
//! struct with two fields rather than a map so that a third slot (or a
//! missing one) cannot be represented.
//!
//! WIRE FORMAT
//! ===========
//! Serialized with camelCase keys. Timestamps use the JavaScript
//! `Date#toJSON` shape (`2024-05-01T09:30:00.000Z`); any RFC 3339 string is
//! accepted on read. Millisecond precision survives a round trip because
//! new timestamps are truncated to milliseconds when created.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// SLOT
// =============================================================================

/// One of the two fixed user slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "friend1")]
    Friend1,
    #[serde(rename = "friend2")]
    Friend2,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Friend1, Slot::Friend2];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friend1 => "friend1",
            Self::Friend2 => "friend2",
        }
    }

    /// The opposite slot: the friend of whoever holds `self`.
    #[must_use]
    pub fn other(self) -> Slot {
        match self {
            Self::Friend1 => Self::Friend2,
            Self::Friend2 => Self::Friend1,
        }
    }

    /// Display name a slot carries until someone claims it.
    #[must_use]
    pub fn placeholder_name(self) -> &'static str {
        match self {
            Self::Friend1 => "Friend 1",
            Self::Friend2 => "Friend 2",
        }
    }

    fn default_avatar_url(self) -> String {
        format!("https://picsum.photos/seed/{}/200", self.as_str())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friend1" => Ok(Self::Friend1),
            "friend2" => Ok(Self::Friend2),
            other => Err(UnknownSlot(other.to_string())),
        }
    }
}

// =============================================================================
// STATUS ENTRY
// =============================================================================

/// A single posted status. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: String,
    pub text: String,
    #[serde(with = "js_date")]
    pub timestamp: OffsetDateTime,
}

impl StatusEntry {
    /// New entry with a fresh unique id.
    #[must_use]
    pub fn new(text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self { id: format!("s-{}", Uuid::new_v4().simple()), text: text.into(), timestamp: truncate_to_millis(timestamp) }
    }
}

/// Current UTC time at millisecond precision.
#[must_use]
pub fn now_ms() -> OffsetDateTime {
    truncate_to_millis(OffsetDateTime::now_utc())
}

fn truncate_to_millis(ts: OffsetDateTime) -> OffsetDateTime {
    ts.replace_millisecond(ts.millisecond()).unwrap_or(ts)
}

// =============================================================================
// USER PROFILE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Slot,
    pub name: String,
    pub avatar_url: String,
    /// Always equal to `status_history[0]`.
    pub current_status: StatusEntry,
    /// Most recent first. Never truncated.
    pub status_history: Vec<StatusEntry>,
}

impl UserProfile {
    fn seed(slot: Slot, status_id: &str, text: &str, timestamp: OffsetDateTime) -> Self {
        let status = StatusEntry { id: status_id.to_string(), text: text.to_string(), timestamp };
        Self {
            id: slot,
            name: slot.placeholder_name().to_string(),
            avatar_url: slot.default_avatar_url(),
            current_status: status.clone(),
            status_history: vec![status],
        }
    }

    /// True while nobody has claimed this slot with their own name.
    /// Either placeholder counts, whichever slot carries it.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        Slot::ALL.iter().any(|slot| self.name == slot.placeholder_name())
    }

    /// Texts of the `limit` most recent statuses, newest first.
    #[must_use]
    pub fn recent_texts(&self, limit: usize) -> Vec<String> {
        self.status_history
            .iter()
            .take(limit)
            .map(|s| s.text.clone())
            .collect()
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// The persisted unit: both profiles, always read and written together.
/// Any key besides the two slots is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub friend1: UserProfile,
    pub friend2: UserProfile,
}

impl Record {
    /// Default record written on first use.
    #[must_use]
    pub fn seed(now: OffsetDateTime) -> Self {
        let now = truncate_to_millis(now);
        Self {
            friend1: UserProfile::seed(Slot::Friend1, "s1-init", "Ready to connect!", now),
            friend2: UserProfile::seed(Slot::Friend2, "s2-init", "Waiting for a friend...", now),
        }
    }

    #[must_use]
    pub fn profile(&self, slot: Slot) -> &UserProfile {
        match slot {
            Slot::Friend1 => &self.friend1,
            Slot::Friend2 => &self.friend2,
        }
    }

    pub fn profile_mut(&mut self, slot: Slot) -> &mut UserProfile {
        match slot {
            Slot::Friend1 => &mut self.friend1,
            Slot::Friend2 => &mut self.friend2,
        }
    }
}

// =============================================================================
// TIMESTAMP CODEC
// =============================================================================

pub(crate) mod js_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{OffsetDateTime, UtcOffset};

    fn format(value: OffsetDateTime) -> Result<String, time::error::Format> {
        value
            .to_offset(UtcOffset::UTC)
            .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"))
    }

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = format(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&raw, &Rfc3339).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
