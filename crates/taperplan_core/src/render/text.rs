//! Per-language instruction sentence rendering.
//!
//! # Responsibility
//! - Render one step as a localized instruction line.
//! - Render a whole schedule as copy-pastable text, skipping placeholders.
//!
//! # Invariants
//! - The opening verb phrase depends only on whether the step is the first
//!   rendered line.
//! - RTL languages mirror the formatted date range (`end - start`), the
//!   underlying data order is unchanged.

use crate::catalog::{Catalog, Language, TextDirection};
use crate::model::date::TaperDate;
use crate::model::schedule::Schedule;
use crate::model::step::{self, Step};
use crate::render::RenderError;
use crate::render::formatter::format_day;

/// Sentence fragments for one language, keyed by its stable identifier.
struct SentencePack {
    tag: &'static str,
    verb_first: &'static str,
    verb_then: &'static str,
    day_one: &'static str,
    day_many: &'static str,
    /// Placeholders: `{verb}` `{dose}` `{days}` `{day_word}` `{dates}`.
    pattern: &'static str,
}

const SENTENCE_PACKS: &[SentencePack] = &[
    SentencePack {
        tag: "en-US",
        verb_first: "Take",
        verb_then: "Then take",
        day_one: "day",
        day_many: "days",
        pattern: "{verb} {dose}mg daily for {days} {day_word} ({dates})",
    },
    SentencePack {
        tag: "es",
        verb_first: "Tomar",
        verb_then: "Después tome",
        day_one: "día",
        day_many: "días",
        pattern: "{verb} {dose}mg cada día durante {days} {day_word} ({dates})",
    },
    SentencePack {
        tag: "zh",
        verb_first: "服用",
        verb_then: "然后服用",
        day_one: "天",
        day_many: "天",
        pattern: "{verb} {dose}毫克，每天服用{days} {day_word} ({dates})",
    },
    SentencePack {
        tag: "ht",
        verb_first: "Pran",
        verb_then: "Apre sa pran",
        day_one: "jou",
        day_many: "jou",
        pattern: "{verb} {dose}mg chak jou pou {days} {day_word} ({dates})",
    },
    SentencePack {
        tag: "sw",
        verb_first: "Kutoka",
        verb_then: "Sasa kutoka",
        day_one: "siku",
        day_many: "siku",
        pattern: "{verb} {dose}mg kwa saa {days} {day_word} ({dates})",
    },
    SentencePack {
        tag: "ar",
        verb_first: "احتياج",
        verb_then: "في ذلك الحين تحتاج",
        day_one: "يوم",
        day_many: "يوم",
        pattern: "{verb} {dose}mg كل يوم {days} {day_word} ({dates})",
    },
];

/// Inputs for rendering one step's instruction line.
#[derive(Debug, Clone, Copy)]
pub struct StepRenderInput<'a> {
    pub step: Step,
    pub start: TaperDate,
    pub end: TaperDate,
    /// Position among rendered lines; 0 selects the opening verb phrase.
    pub index: usize,
    pub language: &'a Language,
}

/// Renders one step as a localized instruction sentence.
pub fn render_step_text(input: &StepRenderInput<'_>) -> Result<String, RenderError> {
    let pack = SENTENCE_PACKS
        .iter()
        .find(|pack| pack.tag == input.language.lang)
        .ok_or_else(|| RenderError::UnsupportedLanguage(input.language.lang.clone()))?;

    let start_text = format_day(&input.start, &input.language.lang)?;
    let end_text = format_day(&input.end, &input.language.lang)?;
    let dates = match input.language.dir {
        TextDirection::Ltr => format!("{start_text} - {end_text}"),
        TextDirection::Rtl => format!("{end_text} - {start_text}"),
    };

    let verb = if input.index == 0 {
        pack.verb_first
    } else {
        pack.verb_then
    };
    let day_word = if input.step.duration_days == 1 {
        pack.day_one
    } else {
        pack.day_many
    };

    Ok(pack
        .pattern
        .replace("{verb}", verb)
        .replace("{dose}", &step::format_dose(input.step.dose))
        .replace("{days}", &input.step.duration_days.to_string())
        .replace("{day_word}", day_word)
        .replace("{dates}", &dates))
}

/// Renders every non-placeholder step on its own line, in schedule order.
///
/// Date ranges are computed against the full step list, so an inner
/// placeholder never shifts the dates of the steps around it.
pub fn render_schedule_text(schedule: &Schedule, catalog: &Catalog) -> Result<String, RenderError> {
    let language = catalog
        .language(&schedule.language_key)
        .ok_or_else(|| RenderError::UnsupportedLanguage(schedule.language_key.clone()))?;

    let mut lines = Vec::new();
    let mut rendered = 0;
    for (index, step) in schedule.steps.iter().enumerate() {
        if step.is_placeholder() {
            continue;
        }
        let range = schedule.step_date_range(index)?;
        lines.push(render_step_text(&StepRenderInput {
            step: *step,
            start: range.start,
            end: range.end,
            index: rendered,
            language,
        })?);
        rendered += 1;
    }

    Ok(lines.join("\n"))
}
