use taperplan_core::codec::serialize;
use taperplan_core::{
    Catalog, Command, MAX_UNDO_DEPTH, ScheduleStore, StartDateInput, Step, StepPatch,
};

fn edit(index: usize, dose: f64, days: u32) -> Command {
    Command::EditStep {
        index,
        patch: StepPatch::from(Step::new(dose, days)),
    }
}

#[test]
fn undo_and_redo_are_no_ops_on_empty_stacks() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();
    let before = store.state().clone();

    store.dispatch(Command::Undo).unwrap();
    assert_eq!(store.state(), &before);

    store.dispatch(Command::Redo).unwrap();
    assert_eq!(store.state(), &before);
}

#[test]
fn undo_then_redo_restores_both_sides_of_a_mutation() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();
    let pristine = serialize(&store.state().schedule).unwrap();

    store.dispatch(edit(0, 42.0, 4)).unwrap();
    let mutated = serialize(&store.state().schedule).unwrap();

    store.dispatch(Command::Undo).unwrap();
    assert_eq!(serialize(&store.state().schedule).unwrap(), pristine);
    assert!(store.state().undo_stack.is_empty());
    assert_eq!(store.state().redo_stack.len(), 1);

    store.dispatch(Command::Redo).unwrap();
    assert_eq!(serialize(&store.state().schedule).unwrap(), mutated);
    assert_eq!(store.state().undo_stack.len(), 1);
    assert!(store.state().redo_stack.is_empty());
}

#[test]
fn a_new_mutation_clears_the_redo_stack() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();

    store.dispatch(edit(0, 42.0, 4)).unwrap();
    store.dispatch(Command::Undo).unwrap();
    assert_eq!(store.state().redo_stack.len(), 1);

    store.dispatch(edit(1, 9.0, 9)).unwrap();
    assert!(store.state().redo_stack.is_empty());
}

#[test]
fn seven_chained_mutations_unwind_to_the_pristine_state() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();
    let pristine = serialize(&store.state().schedule).unwrap();

    store.dispatch(edit(0, 1.0, 1)).unwrap();
    store.dispatch(edit(1, 2.0, 2)).unwrap();
    store
        .dispatch(Command::InsertPlaceholder { index: 3 })
        .unwrap();
    store
        .dispatch(Command::ChangeStartDate(StartDateInput::Text(
            "2025-06-01".to_string(),
        )))
        .unwrap();
    store
        .dispatch(Command::SwitchTemplate("PMR taper".to_string()))
        .unwrap();
    store
        .dispatch(Command::ChangeLanguage("es".to_string()))
        .unwrap();
    store.dispatch(Command::DeleteStep { index: 0 }).unwrap();

    assert_eq!(store.state().undo_stack.len(), 7);

    for _ in 0..7 {
        store.dispatch(Command::Undo).unwrap();
    }

    assert_eq!(serialize(&store.state().schedule).unwrap(), pristine);
    assert!(store.state().undo_stack.is_empty());
    assert_eq!(store.state().redo_stack.len(), 7);
}

#[test]
fn undo_stack_is_bounded_and_evicts_from_the_front() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();

    for round in 0..(MAX_UNDO_DEPTH + 5) {
        store.dispatch(edit(0, round as f64 + 1.0, 1)).unwrap();
    }

    assert_eq!(store.state().undo_stack.len(), MAX_UNDO_DEPTH);

    // The oldest surviving snapshot is from after the fifth mutation, not
    // the pristine state.
    let oldest = store.state().undo_stack[0].clone();
    assert!(oldest.as_str().contains("\"dose\":5.0,\"durationDays\":1"));
}

#[test]
fn reset_restores_the_initial_template_and_clears_both_stacks() {
    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();
    let default_len = store.state().schedule.steps.len();

    store.dispatch(edit(0, 42.0, 4)).unwrap();
    store
        .dispatch(Command::SwitchTemplate("PMR taper".to_string()))
        .unwrap();
    store.dispatch(Command::Undo).unwrap();

    store.dispatch(Command::Reset).unwrap();

    let state = store.state();
    assert_eq!(state.schedule.template_key, "Default");
    assert_eq!(state.schedule.steps.len(), default_len);
    assert!(state.undo_stack.is_empty());
    assert!(state.redo_stack.is_empty());

    // Reset itself is not undoable.
    let after_reset = state.clone();
    store.dispatch(Command::Undo).unwrap();
    assert_eq!(store.state(), &after_reset);
}

#[test]
fn subscribers_observe_every_successful_dispatch() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut store = ScheduleStore::new(Catalog::builtin()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.undo_stack.len()));

    store.dispatch(edit(0, 1.0, 1)).unwrap();
    store.dispatch(Command::Undo).unwrap();

    // Initial emission, then one per dispatch.
    assert_eq!(&*seen.borrow(), &[0, 1, 0]);
}
