//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taperplan_core` wiring.
//! - Print the default schedule as localized instructions for quick local
//!   sanity checks.

use taperplan_core::{Catalog, ScheduleStore, render_schedule_text};

fn main() {
    let store = match ScheduleStore::new(Catalog::builtin()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to build schedule store: {err}");
            std::process::exit(1);
        }
    };

    let state = store.state();
    println!("taperplan_core version={}", taperplan_core::core_version());
    println!(
        "template={} start={} summary={}",
        state.schedule.template_key,
        state.start_date_input_value,
        state.schedule.summary()
    );

    match render_schedule_text(&state.schedule, store.catalog()) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("failed to render schedule: {err}");
            std::process::exit(1);
        }
    }
}
