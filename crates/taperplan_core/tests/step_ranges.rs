use taperplan_core::{RangeError, Schedule, Step, TaperDate};

fn schedule(durations: &[u32]) -> Schedule {
    Schedule {
        steps: durations
            .iter()
            .map(|&days| Step::new(10.0, days))
            .collect(),
        start_date: TaperDate::from_iso("2024-01-01").unwrap(),
        template_key: "Default".to_string(),
        language_key: "en-US".to_string(),
    }
}

#[test]
fn single_day_step_starts_and_ends_on_the_same_day() {
    let schedule = schedule(&[1]);
    let range = schedule.step_date_range(0).unwrap();
    assert_eq!(range.start.iso_day().as_str(), "2024-01-01");
    assert_eq!(range.end.iso_day().as_str(), "2024-01-01");
}

#[test]
fn three_step_schedule_has_consecutive_ranges() {
    let schedule = schedule(&[5, 3, 7]);

    let first = schedule.step_date_range(0).unwrap();
    assert_eq!(first.start.iso_day().as_str(), "2024-01-01");
    assert_eq!(first.end.iso_day().as_str(), "2024-01-05");

    let second = schedule.step_date_range(1).unwrap();
    assert_eq!(second.start.iso_day().as_str(), "2024-01-06");
    assert_eq!(second.end.iso_day().as_str(), "2024-01-08");

    let third = schedule.step_date_range(2).unwrap();
    assert_eq!(third.start.iso_day().as_str(), "2024-01-09");
    assert_eq!(third.end.iso_day().as_str(), "2024-01-15");
}

#[test]
fn each_step_starts_one_day_after_the_previous_ends() {
    let schedule = schedule(&[5, 3, 7, 1, 14]);
    for index in 0..schedule.steps.len() - 1 {
        let current = schedule.step_date_range(index).unwrap();
        let next = schedule.step_date_range(index + 1).unwrap();

        let mut expected = current.end;
        expected.increment_by_days(1);
        assert_eq!(next.start, expected, "gap or overlap after step {index}");
    }
}

#[test]
fn trailing_placeholder_does_not_shift_real_ranges() {
    let mut with_placeholder = schedule(&[5, 3]);
    with_placeholder.steps.push(Step::PLACEHOLDER);

    let bare = schedule(&[5, 3]);
    assert_eq!(
        with_placeholder.step_date_range(1).unwrap(),
        bare.step_date_range(1).unwrap()
    );
}

#[test]
fn out_of_range_indices_are_rejected() {
    let schedule = schedule(&[5, 3]);
    assert_eq!(
        schedule.step_date_range(2),
        Err(RangeError::IndexOutOfRange { index: 2, len: 2 })
    );

    let empty = empty_schedule();
    assert_eq!(
        empty.step_date_range(0),
        Err(RangeError::IndexOutOfRange { index: 0, len: 0 })
    );
}

fn empty_schedule() -> Schedule {
    Schedule {
        steps: Vec::new(),
        start_date: TaperDate::from_iso("2024-01-01").unwrap(),
        template_key: "Default".to_string(),
        language_key: "en-US".to_string(),
    }
}
