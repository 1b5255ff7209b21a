//! Localized instruction text rendering.
//!
//! # Responsibility
//! - Format step boundary dates per locale with a shared formatter cache.
//! - Produce per-language instruction sentences for steps and whole
//!   schedules.
//!
//! # Invariants
//! - Unknown language identifiers always fail with `UnsupportedLanguage`;
//!   the renderer never silently returns empty text.

use crate::model::schedule::RangeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod formatter;
pub mod text;

/// Errors from text rendering and locale formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The language identifier is not registered for rendering.
    UnsupportedLanguage(String),
    /// A step index fell outside the schedule while rendering a list.
    Range(RangeError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLanguage(lang) => {
                write!(f, "unsupported language identifier `{lang}`")
            }
            Self::Range(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Range(err) => Some(err),
            Self::UnsupportedLanguage(_) => None,
        }
    }
}

impl From<RangeError> for RenderError {
    fn from(value: RangeError) -> Self {
        Self::Range(value)
    }
}
