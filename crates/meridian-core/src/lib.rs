//! meridian-core
//!
//! Pure domain types for the treatment-course engine: closed clinical
//! enumerations, the per-visit state record, generation requests/results,
//! and the collaborator seams (rule engine, option whitelist).
//! No randomness and no I/O; this is the shared vocabulary of Meridian.

pub mod error;
pub mod models;
pub mod rules;
pub mod whitelist;
