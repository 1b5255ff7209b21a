//! Calendar-day date type for taper schedules.
//!
//! # Responsibility
//! - Anchor every schedule date to noon UTC of its calendar day.
//! - Provide ISO `YYYY-MM-DD` parsing, formatting and whole-day arithmetic.
//!
//! # Invariants
//! - The wrapped instant is always exactly 12:00:00 UTC, so whole-day
//!   increments never shift the calendar day across a DST boundary.
//! - Two dates are equal iff their ISO day strings are equal.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso day regex"));

/// Tag carried by serialized date fields (see `codec`).
pub(crate) const DATE_TAG: &str = "Date";

/// Errors from date parsing and date-field decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input text is not a zero-padded `YYYY-MM-DD` calendar day.
    InvalidDateString(String),
    /// A date-tagged field held something other than day text.
    InvalidInputType(String),
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateString(text) => {
                write!(f, "invalid date string `{text}`; expected YYYY-MM-DD")
            }
            Self::InvalidInputType(value) => {
                write!(f, "invalid date input {value}; expected string or date")
            }
        }
    }
}

impl Error for DateError {}

/// Branded zero-padded `YYYY-MM-DD` day string.
///
/// Constructed only through validation, so a raw unvalidated string can
/// never flow into date-typed state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsoDay(String);

impl IsoDay {
    /// Validates and brands a `YYYY-MM-DD` string.
    pub fn new(text: impl Into<String>) -> Result<Self, DateError> {
        let text = text.into();
        parse_day(&text)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IsoDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_day(text: &str) -> Result<NaiveDate, DateError> {
    if !ISO_DAY_RE.is_match(text) {
        return Err(DateError::InvalidDateString(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| DateError::InvalidDateString(text.to_string()))
}

/// Day-granularity schedule date pinned to noon UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaperDate(DateTime<Utc>);

impl TaperDate {
    fn from_day(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        Self(DateTime::from_naive_utc_and_offset(noon, Utc))
    }

    /// Today's UTC calendar day.
    pub fn today() -> Self {
        Self::from_instant(Utc::now())
    }

    /// Normalizes an arbitrary instant, discarding its time of day.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self::from_day(instant.date_naive())
    }

    /// Parses a `YYYY-MM-DD` day string.
    pub fn from_iso(text: &str) -> Result<Self, DateError> {
        parse_day(text).map(Self::from_day)
    }

    /// Adds whole days in place and re-normalizes; chainable.
    pub fn increment_by_days(&mut self, days: i64) -> &mut Self {
        *self = Self::from_day(self.0.date_naive() + Duration::days(days));
        self
    }

    /// The branded `YYYY-MM-DD` form of this day.
    pub fn iso_day(&self) -> IsoDay {
        IsoDay(self.0.format("%Y-%m-%d").to_string())
    }

    /// The normalized noon-UTC instant, for locale formatting.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// The civil calendar day.
    pub fn civil_day(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Display for TaperDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.iso_day(), f)
    }
}

// Date fields serialize as `{"tag": "Date", "value": "YYYY-MM-DD"}` so two
// schedules differing only in construction path snapshot identically.
impl Serialize for TaperDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut wrapper = serializer.serialize_struct("TaperDate", 2)?;
        wrapper.serialize_field("tag", DATE_TAG)?;
        wrapper.serialize_field("value", self.iso_day().as_str())?;
        wrapper.end()
    }
}

impl<'de> Deserialize<'de> for TaperDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            tag: String,
            value: serde_json::Value,
        }

        let wrapper = Wrapper::deserialize(deserializer)?;
        if wrapper.tag != DATE_TAG {
            return Err(de::Error::custom(format!(
                "unexpected date field tag `{}`",
                wrapper.tag
            )));
        }
        let text = wrapper.value.as_str().ok_or_else(|| {
            de::Error::custom(DateError::InvalidInputType(wrapper.value.to_string()))
        })?;
        Self::from_iso(text).map_err(de::Error::custom)
    }
}
