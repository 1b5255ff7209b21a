//! Schedule aggregate and step date-range computation.
//!
//! # Responsibility
//! - Hold the ordered step list with its start date and template/language
//!   selection.
//! - Anchor each step to its calendar date range.
//!
//! # Invariants
//! - Step N+1 starts exactly one day after step N ends; ranges never gap or
//!   overlap.
//! - A 1-day step starts and ends on the same calendar day.

use crate::model::date::TaperDate;
use crate::model::step::{self, Step};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from index-addressed schedule queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Requested index is outside the current step list.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for RangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "step index {index} out of range for {len} steps")
            }
        }
    }
}

impl Error for RangeError {}

/// The ordered taper regimen: steps, start date, and active selections.
///
/// After every completed store mutation the step list ends with exactly one
/// trailing placeholder (see `store`); the steps before it are the committed
/// regimen in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub steps: Vec<Step>,
    pub start_date: TaperDate,
    pub template_key: String,
    pub language_key: String,
}

/// Resolved calendar bounds of one step; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDateRange {
    pub start: TaperDate,
    pub end: TaperDate,
}

impl Schedule {
    /// Computes the inclusive start/end dates of the step at `index`.
    ///
    /// Step 0 starts on the schedule start date. Each later step starts
    /// after the sum of `duration_days - 1` over all preceding steps plus
    /// one transition day per preceding step. The end date is
    /// `duration_days - 1` after the start.
    pub fn step_date_range(&self, index: usize) -> Result<StepDateRange, RangeError> {
        let step = self
            .steps
            .get(index)
            .ok_or(RangeError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            })?;

        let offset: i64 = self.steps[..index]
            .iter()
            .map(|step| i64::from(step.duration_days) - 1)
            .sum::<i64>()
            + index as i64;

        let mut start = self.start_date;
        start.increment_by_days(offset);
        let mut end = start;
        end.increment_by_days(i64::from(step.duration_days) - 1);

        Ok(StepDateRange { start, end })
    }

    /// True when no committed (non-trailing) step is invalid.
    pub fn is_valid(&self) -> bool {
        let committed = self.steps.len().saturating_sub(1);
        !self.steps[..committed].iter().any(|step| step.is_invalid())
    }

    /// One-line aggregate, e.g. `75mg over 20 days`.
    pub fn summary(&self) -> String {
        format!(
            "{}mg over {} days",
            step::format_dose(step::sum_dose(&self.steps)),
            step::sum_days(&self.steps)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Schedule;
    use crate::model::date::TaperDate;
    use crate::model::step::Step;

    fn schedule(steps: Vec<Step>) -> Schedule {
        Schedule {
            steps,
            start_date: TaperDate::from_iso("2024-01-01").expect("valid day"),
            template_key: "Default".to_string(),
            language_key: "en-US".to_string(),
        }
    }

    #[test]
    fn validity_ignores_the_trailing_slot() {
        let valid = schedule(vec![Step::new(20.0, 5), Step::PLACEHOLDER]);
        assert!(valid.is_valid());

        let invalid = schedule(vec![Step::new(0.0, 5), Step::PLACEHOLDER]);
        assert!(!invalid.is_valid());
    }

    #[test]
    fn summary_reports_total_dose_and_days() {
        let s = schedule(vec![
            Step::new(20.0, 5),
            Step::new(10.0, 2),
            Step::PLACEHOLDER,
        ]);
        assert_eq!(s.summary(), "120mg over 7 days");
    }
}
