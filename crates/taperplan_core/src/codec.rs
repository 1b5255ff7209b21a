//! Snapshot serialization codec.
//!
//! # Responsibility
//! - Convert a schedule to/from the string snapshots held by the undo/redo
//!   stacks.
//! - Normalize every date field to a tagged ISO day wrapper so structural
//!   equality of schedules is equality of snapshot strings.
//!
//! # Invariants
//! - Snapshots are fully independent copies; deserializing never aliases
//!   live state.
//! - `deserialize(serialize(s)) == s` for every valid schedule.

use crate::model::schedule::Schedule;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Branded snapshot string; produced only by [`serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedSchedule(String);

impl SerializedSchedule {
    /// Reconstitutes a snapshot a host persisted earlier; the text is not
    /// validated until [`deserialize`].
    pub fn from_string(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SerializedSchedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from snapshot encoding and decoding.
#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    /// Includes malformed date wrappers; the message carries the
    /// underlying `DateError`.
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode schedule snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode schedule snapshot: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Encodes a schedule as a JSON snapshot with tagged date fields.
pub fn serialize(schedule: &Schedule) -> Result<SerializedSchedule, CodecError> {
    serde_json::to_string(schedule)
        .map(SerializedSchedule)
        .map_err(CodecError::Encode)
}

/// Reconstitutes a schedule from a snapshot; tagged date wrappers rebuild
/// normalized `TaperDate`s.
pub fn deserialize(snapshot: &SerializedSchedule) -> Result<Schedule, CodecError> {
    serde_json::from_str(&snapshot.0).map_err(CodecError::Decode)
}
