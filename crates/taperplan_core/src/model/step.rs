//! Step entity and validation predicates.
//!
//! # Responsibility
//! - Define the `{dose, durationDays}` segment of a taper schedule.
//! - Provide placeholder/invalid predicates and aggregate sums.
//!
//! # Invariants
//! - A placeholder (`dose == 0 && duration_days == 0`) is a distinguished
//!   allowed state; callers must check it before treating a step as invalid.

use serde::{Deserialize, Serialize};

/// One dose/duration segment of a taper schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Daily dose in milligrams.
    pub dose: f64,
    /// Number of consecutive days the dose is taken.
    pub duration_days: u32,
}

impl Step {
    /// The sentinel "add a new step here" slot.
    pub const PLACEHOLDER: Step = Step {
        dose: 0.0,
        duration_days: 0,
    };

    pub fn new(dose: f64, duration_days: u32) -> Self {
        Self {
            dose,
            duration_days,
        }
    }

    /// Both fields zero.
    pub fn is_placeholder(&self) -> bool {
        self.dose == 0.0 && self.duration_days == 0
    }

    /// Either field non-positive. A placeholder also satisfies this; check
    /// `is_placeholder` first where placeholder-as-invalid would be wrong.
    pub fn is_invalid(&self) -> bool {
        self.dose <= 0.0 || self.duration_days == 0
    }
}

/// Partial step input from an edit form; missing fields normalize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPatch {
    pub dose: Option<f64>,
    pub duration_days: Option<u32>,
}

impl StepPatch {
    pub fn resolve(self) -> Step {
        Step {
            dose: self.dose.unwrap_or(0.0),
            duration_days: self.duration_days.unwrap_or(0),
        }
    }
}

impl From<Step> for StepPatch {
    fn from(step: Step) -> Self {
        Self {
            dose: Some(step.dose),
            duration_days: Some(step.duration_days),
        }
    }
}

/// Total dose over a step list: Σ dose · days. Placeholders contribute 0.
pub fn sum_dose(steps: &[Step]) -> f64 {
    steps
        .iter()
        .map(|step| step.dose * f64::from(step.duration_days))
        .sum()
}

/// Total days over a step list. Placeholders contribute 0.
pub fn sum_days(steps: &[Step]) -> u64 {
    steps
        .iter()
        .map(|step| u64::from(step.duration_days))
        .sum()
}

/// True when the step before `index` is a placeholder.
pub fn is_directly_after_placeholder(steps: &[Step], index: usize) -> bool {
    if index == 0 || index >= steps.len() {
        return false;
    }
    steps[index - 1].is_placeholder()
}

/// True when the step at `index` is, or directly follows, a placeholder.
pub fn is_or_directly_after_placeholder(steps: &[Step], index: usize) -> bool {
    match steps.get(index) {
        None => false,
        Some(step) => step.is_placeholder() || is_directly_after_placeholder(steps, index),
    }
}

/// Renders a dose without a trailing `.0` for whole-number values.
pub fn format_dose(dose: f64) -> String {
    if dose.fract() == 0.0 {
        format!("{}", dose as i64)
    } else {
        dose.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Step, StepPatch, format_dose, is_or_directly_after_placeholder, sum_days, sum_dose,
    };

    #[test]
    fn placeholder_is_distinguished_from_invalid() {
        assert!(Step::PLACEHOLDER.is_placeholder());
        assert!(Step::PLACEHOLDER.is_invalid());
        assert!(!Step::new(20.0, 5).is_placeholder());
        assert!(!Step::new(20.0, 5).is_invalid());
        assert!(Step::new(0.0, 5).is_invalid());
        assert!(Step::new(20.0, 0).is_invalid());
    }

    #[test]
    fn sums_weight_dose_by_days_and_skip_placeholders() {
        let steps = [Step::new(20.0, 5), Step::new(10.0, 2), Step::PLACEHOLDER];
        assert_eq!(sum_dose(&steps), 120.0);
        assert_eq!(sum_days(&steps), 7);
    }

    #[test]
    fn patch_fields_default_to_zero() {
        let patch = StepPatch {
            dose: Some(5.0),
            duration_days: None,
        };
        assert_eq!(patch.resolve(), Step::new(5.0, 0));
        assert_eq!(StepPatch::default().resolve(), Step::PLACEHOLDER);
    }

    #[test]
    fn placeholder_adjacency_predicates() {
        let steps = [Step::new(1.0, 1), Step::PLACEHOLDER, Step::new(2.0, 2)];
        assert!(is_or_directly_after_placeholder(&steps, 1));
        assert!(is_or_directly_after_placeholder(&steps, 2));
        assert!(!is_or_directly_after_placeholder(&steps, 0));
        assert!(!is_or_directly_after_placeholder(&steps, 9));
    }

    #[test]
    fn dose_formatting_trims_whole_numbers_only() {
        assert_eq!(format_dose(20.0), "20");
        assert_eq!(format_dose(12.5), "12.5");
    }
}
