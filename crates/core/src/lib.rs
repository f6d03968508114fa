//! Pure domain logic for the cold-lead nurture pipeline.
//!
//! This crate contains no I/O and no database dependency. Every function
//! here is a deterministic mapping from already-loaded facts (plus an
//! explicitly injected `now`) to derived state:
//!
//! - [`course`] — the canonical section vocabulary for the intro course
//! - [`projection`] — progress events -> course-state snapshot
//! - [`signal`] — course state + invite flag -> hot-lead signal
//! - [`decision`] — lead status -> single recommended next action
//!
//! Callers (the `db` and `api` crates) load rows, call in here, and
//! persist or serve the results.

pub mod course;
pub mod decision;
pub mod error;
pub mod projection;
pub mod signal;
pub mod time;
pub mod types;
