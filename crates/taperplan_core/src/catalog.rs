//! Injected template and language tables.
//!
//! # Responsibility
//! - Carry the constant data the store and renderer consume: named step
//!   templates and the registered languages.
//! - Stay deserializable so a host can supply its own tables as JSON.
//!
//! # Invariants
//! - Table order is meaningful: the first template and first language are
//!   the defaults.
//! - The store never hardcodes template contents; it only reads this table.

use crate::model::step::Step;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reading order of a language's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// One registered output language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// English display label for pickers.
    pub label_en: String,
    /// Stable identifier used for lookups and locale formatting.
    pub lang: String,
    /// False until a native speaker has reviewed the translation; the UI
    /// shows a warning badge, the core only exposes the flag.
    pub verified: bool,
    pub dir: TextDirection,
}

/// A named, ordered step template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub key: String,
    pub steps: Vec<Step>,
}

/// Errors from loading a host-supplied catalog.
#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    /// Named table has no entries.
    EmptyTable(&'static str),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid catalog JSON: {err}"),
            Self::EmptyTable(table) => write!(f, "catalog table `{table}` must not be empty"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyTable(_) => None,
        }
    }
}

/// Constant data injected into the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<TemplateEntry>,
    pub languages: Vec<Language>,
}

impl Catalog {
    /// Parses a host-supplied catalog, rejecting empty tables.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(text).map_err(CatalogError::Parse)?;
        if catalog.templates.is_empty() {
            return Err(CatalogError::EmptyTable("templates"));
        }
        if catalog.languages.is_empty() {
            return Err(CatalogError::EmptyTable("languages"));
        }
        Ok(catalog)
    }

    pub fn template(&self, key: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|entry| entry.key == key)
    }

    pub fn language(&self, lang: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.lang == lang)
    }

    pub fn default_template(&self) -> Option<&TemplateEntry> {
        self.templates.first()
    }

    pub fn default_language(&self) -> Option<&Language> {
        self.languages.first()
    }

    /// The built-in prednisone taper templates and language registry.
    pub fn builtin() -> Self {
        Self {
            templates: vec![
                template("Default", &[(20.0, 5), (15.0, 5), (10.0, 5), (5.0, 5)]),
                template(
                    "Giacta 6-month taper",
                    &[
                        (60.0, 7),
                        (50.0, 7),
                        (40.0, 7),
                        (35.0, 7),
                        (30.0, 7),
                        (25.0, 7),
                        (20.0, 7),
                        (15.0, 7),
                        (12.5, 14),
                        (10.0, 7),
                        (9.0, 7),
                        (8.0, 7),
                        (7.0, 7),
                        (6.0, 14),
                        (5.0, 14),
                        (4.0, 14),
                        (3.0, 14),
                        (2.0, 14),
                        (1.0, 14),
                    ],
                ),
                template(
                    "Giacta 12-month taper",
                    &[
                        (60.0, 7),
                        (50.0, 7),
                        (40.0, 7),
                        (35.0, 7),
                        (30.0, 7),
                        (25.0, 7),
                        (20.0, 7),
                        (17.5, 14),
                        (15.0, 14),
                        (12.5, 7),
                        (10.0, 28),
                        (9.0, 28),
                        (8.0, 28),
                        (7.0, 28),
                        (6.0, 28),
                        (5.0, 28),
                        (4.0, 28),
                        (3.0, 28),
                        (2.0, 28),
                        (1.0, 28),
                    ],
                ),
                template(
                    "PMR taper",
                    &[
                        (15.0, 14),
                        (12.5, 14),
                        (10.0, 14),
                        (9.0, 30),
                        (8.0, 30),
                        (7.0, 30),
                        (6.0, 30),
                        (5.0, 90),
                        (4.0, 30),
                        (3.0, 30),
                        (2.0, 30),
                        (1.0, 30),
                    ],
                ),
            ],
            languages: vec![
                language("English", "en-US", true, TextDirection::Ltr),
                language("Spanish", "es", true, TextDirection::Ltr),
                language("Mandarin", "zh", false, TextDirection::Ltr),
                language("Haitian Creole", "ht", false, TextDirection::Ltr),
                language("Swahili", "sw", false, TextDirection::Ltr),
                language("Arabic", "ar", false, TextDirection::Rtl),
            ],
        }
    }
}

fn template(key: &str, steps: &[(f64, u32)]) -> TemplateEntry {
    TemplateEntry {
        key: key.to_string(),
        steps: steps
            .iter()
            .map(|&(dose, duration_days)| Step::new(dose, duration_days))
            .collect(),
    }
}

fn language(label_en: &str, lang: &str, verified: bool, dir: TextDirection) -> Language {
    Language {
        label_en: label_en.to_string(),
        lang: lang.to_string(),
        verified,
        dir,
    }
}
