//! Weighted scoring and ranking.
//!
//! # Responsibility
//! - Derive per-option totals and per-criterion breakdowns from a project.
//! - Order options by rounded total score.
//!
//! # Invariants
//! - Both engines are pure; results are recomputed on demand and never
//!   written back into the project document.
//! - A missing evaluation cell scores as the neutral value.

pub mod engine;
pub mod ranking;

/// Neutral ("average") score used for missing evaluation cells.
pub const NEUTRAL_SCORE: f64 = 3.0;
