//! Schedule store and undo/redo command engine.
//!
//! # Responsibility
//! - Own the live `AppState` and apply every mutating command through one
//!   reducer.
//! - Maintain bounded undo/redo stacks of serialized snapshots.
//! - Restore the trailing-placeholder invariant after mutations that can
//!   destroy it.
//!
//! # Invariants
//! - Commands validate their inputs before the undo snapshot is pushed; a
//!   failing command leaves stacks and schedule untouched.
//! - Snapshots are serialized copies, never aliases of live state.
//! - The undo stack never exceeds `MAX_UNDO_DEPTH`; oldest entries evict
//!   first.

use crate::catalog::Catalog;
use crate::codec::{self, CodecError, SerializedSchedule};
use crate::model::date::{DateError, IsoDay, TaperDate};
use crate::model::schedule::{RangeError, Schedule};
use crate::model::step::{Step, StepPatch};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum retained undo snapshots.
pub const MAX_UNDO_DEPTH: usize = 50;

/// Raw start-date input from the edit surface.
#[derive(Debug, Clone, PartialEq)]
pub enum StartDateInput {
    /// Text from a date field; empty text means "skip to tomorrow".
    Text(String),
    /// An already-normalized day.
    Day(TaperDate),
}

/// One edit intent dispatched against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    EditStep { index: usize, patch: StepPatch },
    ChangeStartDate(StartDateInput),
    InsertPlaceholder { index: usize },
    SwitchTemplate(String),
    ChangeLanguage(String),
    DeleteStep { index: usize },
    Undo,
    Redo,
    Reset,
}

/// Errors from store command application.
#[derive(Debug)]
pub enum StoreError {
    Date(DateError),
    Range(RangeError),
    Codec(CodecError),
    /// `SwitchTemplate` named a template absent from the catalog.
    UnknownTemplate(String),
    /// `ChangeLanguage` named an unregistered language identifier.
    UnsupportedLanguage(String),
    /// The injected catalog has no entries in the named table.
    EmptyCatalog(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(err) => write!(f, "{err}"),
            Self::Range(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::UnknownTemplate(key) => write!(f, "unknown template `{key}`"),
            Self::UnsupportedLanguage(lang) => {
                write!(f, "unsupported language identifier `{lang}`")
            }
            Self::EmptyCatalog(table) => write!(f, "catalog table `{table}` is empty"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::Range(err) => Some(err),
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateError> for StoreError {
    fn from(value: DateError) -> Self {
        Self::Date(value)
    }
}

impl From<RangeError> for StoreError {
    fn from(value: RangeError) -> Self {
        Self::Range(value)
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// The complete engine state: live schedule plus snapshot stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub schedule: Schedule,
    pub undo_stack: Vec<SerializedSchedule>,
    pub redo_stack: Vec<SerializedSchedule>,
    /// Raw mirror of the start-date field, kept as entered.
    pub start_date_input_value: IsoDay,
}

/// Applies one command to the state; the single mutation path.
///
/// Shared transaction shape for regular edits: validate, snapshot onto the
/// undo stack (clearing redo), mutate, restore the trailing placeholder
/// where the mutation can destroy it.
pub fn apply(state: &mut AppState, command: Command, catalog: &Catalog) -> Result<(), StoreError> {
    match command {
        Command::EditStep { index, patch } => {
            let len = state.schedule.steps.len();
            if index >= len {
                return Err(RangeError::IndexOutOfRange { index, len }.into());
            }
            snapshot_for_undo(state)?;
            state.schedule.steps[index] = patch.resolve();
            // Editing the last slot into a real step consumes the trailing
            // placeholder; restore it. An inner placeholder does not count.
            if !state
                .schedule
                .steps
                .last()
                .is_some_and(Step::is_placeholder)
            {
                state.schedule.steps.push(Step::PLACEHOLDER);
            }
            debug!("event=edit_step module=store status=ok index={index}");
            Ok(())
        }
        Command::ChangeStartDate(input) => {
            let date = resolve_start_date(&input)?;
            snapshot_for_undo(state)?;
            state.schedule.start_date = date;
            state.start_date_input_value = date.iso_day();
            debug!(
                "event=change_start_date module=store status=ok day={}",
                date.iso_day()
            );
            Ok(())
        }
        Command::InsertPlaceholder { index } => {
            let len = state.schedule.steps.len();
            if index > len {
                return Err(RangeError::IndexOutOfRange { index, len }.into());
            }
            snapshot_for_undo(state)?;
            insert_placeholder(&mut state.schedule.steps, index);
            debug!("event=insert_placeholder module=store status=ok index={index}");
            Ok(())
        }
        Command::SwitchTemplate(key) => {
            let template = catalog
                .template(&key)
                .ok_or_else(|| StoreError::UnknownTemplate(key.clone()))?;
            let mut steps = template.steps.clone();
            steps.push(Step::PLACEHOLDER);
            snapshot_for_undo(state)?;
            state.schedule.steps = steps;
            state.schedule.template_key = key.clone();
            debug!("event=switch_template module=store status=ok template={key}");
            Ok(())
        }
        Command::ChangeLanguage(key) => {
            if catalog.language(&key).is_none() {
                return Err(StoreError::UnsupportedLanguage(key));
            }
            snapshot_for_undo(state)?;
            state.schedule.language_key = key.clone();
            debug!("event=change_language module=store status=ok language={key}");
            Ok(())
        }
        Command::DeleteStep { index } => {
            let len = state.schedule.steps.len();
            if index >= len {
                return Err(RangeError::IndexOutOfRange { index, len }.into());
            }
            snapshot_for_undo(state)?;
            state.schedule.steps.remove(index);
            debug!("event=delete_step module=store status=ok index={index}");
            Ok(())
        }
        Command::Undo => {
            // Deserialize before touching state so a bad snapshot cannot
            // leave stacks and live schedule inconsistent.
            let Some(snapshot) = state.undo_stack.last() else {
                return Ok(());
            };
            let restored = codec::deserialize(snapshot)?;
            let current = codec::serialize(&state.schedule)?;
            state.undo_stack.pop();
            state.redo_stack.push(current);
            state.schedule = restored;
            debug!(
                "event=undo module=store status=ok undo_depth={} redo_depth={}",
                state.undo_stack.len(),
                state.redo_stack.len()
            );
            Ok(())
        }
        Command::Redo => {
            let Some(snapshot) = state.redo_stack.last() else {
                return Ok(());
            };
            let restored = codec::deserialize(snapshot)?;
            let current = codec::serialize(&state.schedule)?;
            state.redo_stack.pop();
            state.undo_stack.push(current);
            state.schedule = restored;
            debug!(
                "event=redo module=store status=ok undo_depth={} redo_depth={}",
                state.undo_stack.len(),
                state.redo_stack.len()
            );
            Ok(())
        }
        Command::Reset => {
            let schedule = initial_schedule(catalog)?;
            state.start_date_input_value = schedule.start_date.iso_day();
            state.schedule = schedule;
            state.undo_stack.clear();
            state.redo_stack.clear();
            debug!("event=reset module=store status=ok");
            Ok(())
        }
    }
}

fn snapshot_for_undo(state: &mut AppState) -> Result<(), StoreError> {
    let snapshot = codec::serialize(&state.schedule)?;
    state.undo_stack.push(snapshot);
    if state.undo_stack.len() > MAX_UNDO_DEPTH {
        let excess = state.undo_stack.len() - MAX_UNDO_DEPTH;
        state.undo_stack.drain(..excess);
    }
    state.redo_stack.clear();
    Ok(())
}

fn resolve_start_date(input: &StartDateInput) -> Result<TaperDate, StoreError> {
    match input {
        StartDateInput::Day(day) => Ok(*day),
        StartDateInput::Text(text) if text.is_empty() => {
            let mut day = TaperDate::today();
            day.increment_by_days(1);
            Ok(day)
        }
        StartDateInput::Text(text) => Ok(TaperDate::from_iso(text)?),
    }
}

/// Inserts a placeholder before `index`, consolidating any existing inner
/// placeholder first.
///
/// The list may hold at most one inner placeholder (any slot except the
/// last) on entry. When one exists at position `p`, all placeholders are
/// removed and a trailing one restored before splicing; an insertion point
/// past `p` shifts left by one to compensate for the removed slot.
fn insert_placeholder(steps: &mut Vec<Step>, index: usize) {
    let inner = steps
        .iter()
        .take(steps.len().saturating_sub(1))
        .position(Step::is_placeholder);

    match inner {
        None => steps.insert(index, Step::PLACEHOLDER),
        Some(p) => {
            let target = if index <= p { index } else { index - 1 };
            steps.retain(|step| !step.is_placeholder());
            steps.push(Step::PLACEHOLDER);
            steps.insert(target, Step::PLACEHOLDER);
        }
    }
}

fn initial_schedule(catalog: &Catalog) -> Result<Schedule, StoreError> {
    let template = catalog
        .default_template()
        .ok_or(StoreError::EmptyCatalog("templates"))?;
    let language = catalog
        .default_language()
        .ok_or(StoreError::EmptyCatalog("languages"))?;

    let mut steps = template.steps.clone();
    steps.push(Step::PLACEHOLDER);
    Ok(Schedule {
        steps,
        start_date: TaperDate::today(),
        template_key: template.key.clone(),
        language_key: language.lang.clone(),
    })
}

type Subscriber = Box<dyn Fn(&AppState)>;

/// Owns the live state, the injected catalog, and change subscribers.
///
/// Callers read state through [`ScheduleStore::state`] and must not retain
/// mutable copies; all edits go through [`ScheduleStore::dispatch`].
pub struct ScheduleStore {
    state: AppState,
    catalog: Catalog,
    subscribers: Vec<Subscriber>,
}

impl ScheduleStore {
    /// Builds the initial state from the catalog's default template and
    /// today's date.
    pub fn new(catalog: Catalog) -> Result<Self, StoreError> {
        let schedule = initial_schedule(&catalog)?;
        let state = AppState {
            start_date_input_value: schedule.start_date.iso_day(),
            schedule,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        };
        info!(
            "event=store_init module=store status=ok template={} language={}",
            state.schedule.template_key, state.schedule.language_key
        );
        Ok(Self {
            state,
            catalog,
            subscribers: Vec::new(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registers a change callback; it fires immediately with the current
    /// state and after every successful dispatch.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AppState) + 'static) {
        subscriber(&self.state);
        self.subscribers.push(Box::new(subscriber));
    }

    /// Applies a command and notifies subscribers on success.
    pub fn dispatch(&mut self, command: Command) -> Result<(), StoreError> {
        apply(&mut self.state, command, &self.catalog)?;
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
        Ok(())
    }
}
