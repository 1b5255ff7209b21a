//! Locale-aware calendar-day formatting.
//!
//! # Responsibility
//! - Format a `TaperDate` as a short localized day, e.g. `Jun 1`.
//! - Cache resolved formats keyed by `(language, year_visible)`.
//!
//! # Invariants
//! - Formatting reads only UTC day/month/year fields; the local timezone
//!   never influences the rendered day.
//! - The year appears only when the date falls outside the current
//!   calendar year.

use crate::model::date::TaperDate;
use crate::render::RenderError;
use chrono::{Datelike, Locale, Utc};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct CachedFormat {
    locale: Locale,
    pattern: &'static str,
}

static FORMAT_CACHE: Lazy<Mutex<HashMap<(String, bool), CachedFormat>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn locale_for_tag(tag: &str) -> Option<Locale> {
    match tag {
        "en-US" => Some(Locale::en_US),
        "es" => Some(Locale::es_ES),
        "zh" => Some(Locale::zh_CN),
        "ht" => Some(Locale::ht_HT),
        "sw" => Some(Locale::sw_KE),
        "ar" => Some(Locale::ar_SA),
        _ => None,
    }
}

/// Formats one calendar day for the given language identifier.
///
/// Near-term dates omit the year; dates outside the current calendar year
/// disambiguate with it.
pub fn format_day(date: &TaperDate, tag: &str) -> Result<String, RenderError> {
    let year_visible = date.civil_day().year() != Utc::now().year();
    let key = (tag.to_string(), year_visible);

    // A poisoned cache still holds valid entries; recover rather than fail.
    let mut cache = match FORMAT_CACHE.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !cache.contains_key(&key) {
        let locale = locale_for_tag(tag)
            .ok_or_else(|| RenderError::UnsupportedLanguage(tag.to_string()))?;
        let pattern = if year_visible { "%b %-d, %Y" } else { "%b %-d" };
        cache.insert(key.clone(), CachedFormat { locale, pattern });
    }

    let format = cache[&key];
    Ok(date
        .instant()
        .format_localized(format.pattern, format.locale)
        .to_string())
}
