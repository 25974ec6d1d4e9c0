//! meridian-engine
//!
//! Longitudinal visit-state simulation: a seeded generator, the muscle
//! selector, the goal-path scheduler, the assessment derivation functions,
//! and the sequencer that ties them into one `VisitState` per visit.
//!
//! Everything here is synchronous and allocation-local to a single
//! [`generate_course`](sequencer::generate_course) call.

pub mod assessment;
pub mod config;
pub mod error;
pub mod goal_path;
pub mod muscles;
pub mod rng;
pub mod sequencer;

pub use sequencer::{generate_course, Collaborators};
