//! Domain model for taper schedules.
//!
//! # Responsibility
//! - Define the canonical data structures used by the schedule engine.
//! - Keep date normalization and step validation in one place.
//!
//! # Invariants
//! - Every schedule date is a `TaperDate` pinned to noon UTC.
//! - Placeholder semantics live on `Step`; list-level invariants live in
//!   `store`.

pub mod date;
pub mod schedule;
pub mod step;
