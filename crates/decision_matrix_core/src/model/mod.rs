//! Decision-matrix domain model.
//!
//! # Responsibility
//! - Define the wire/persisted shapes for options, criteria, evaluations,
//!   projects and the project collection.
//! - Provide project-local mutation primitives that keep the evaluation
//!   matrix free of dangling cells.
//!
//! # Invariants
//! - Option and criterion identity is `id`; names are freely mutable.
//! - Evaluation cells exist only for option/criterion ids present in the
//!   owning project.
//! - Timestamps are ISO-8601 strings and round-trip unchanged.

pub mod id;
pub mod project;
pub mod sample;
