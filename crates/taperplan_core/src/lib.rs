//! Taper schedule state engine.
//! This crate is the single source of truth for schedule invariants.

pub mod catalog;
pub mod codec;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;

pub use catalog::{Catalog, CatalogError, Language, TemplateEntry, TextDirection};
pub use codec::{CodecError, SerializedSchedule};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{DateError, IsoDay, TaperDate};
pub use model::schedule::{RangeError, Schedule, StepDateRange};
pub use model::step::{Step, StepPatch};
pub use render::RenderError;
pub use render::text::{StepRenderInput, render_schedule_text, render_step_text};
pub use store::{AppState, Command, MAX_UNDO_DEPTH, ScheduleStore, StartDateInput, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
