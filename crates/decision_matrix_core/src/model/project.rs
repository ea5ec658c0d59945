//! Project document model.
//!
//! # Responsibility
//! - Define the canonical project document shared by persistence and share
//!   links.
//! - Provide mutation primitives that keep options, criteria and the
//!   evaluation matrix consistent.
//!
//! # Invariants
//! - Adding an option seeds its row across all existing criteria.
//! - Adding a criterion seeds its column across all existing options.
//! - Removing an option/criterion deletes its row/column; no orphaned cells.
//! - Primitives here never touch `updated_at`; stamping is the store's job.

use crate::model::id::generate_id;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option id -> criterion id -> score.
pub type EvaluationMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// Returns the current UTC time as an ISO-8601 string with millisecond
/// precision, e.g. `2024-01-01T12:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A named alternative being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
}

/// A named, weighted axis of comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    /// Unconstrained multiplier applied to every score in this column.
    pub weight: f64,
}

/// Named, timestamped bundle of options, criteria and evaluations.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) to match the
/// persisted and shared document shape. `id`, timestamps and `evaluations`
/// default when absent so older single-project documents still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub options: Vec<OptionItem>,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub evaluations: EvaluationMatrix,
}

impl Project {
    /// Creates an empty project with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(generate_id(), name)
    }

    /// Creates an empty project with a caller-provided id.
    ///
    /// Both timestamps are set to the same instant.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now.clone(),
            updated_at: now,
            options: Vec::new(),
            criteria: Vec::new(),
            evaluations: EvaluationMatrix::new(),
        }
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = timestamp_now();
    }

    /// Fills missing identity and timestamp fields of an imported document.
    ///
    /// Returns `true` when anything was filled.
    pub fn fill_missing_metadata(&mut self) -> bool {
        let mut filled = false;
        if self.id.trim().is_empty() {
            self.id = generate_id();
            filled = true;
        }
        if self.created_at.is_empty() {
            self.created_at = timestamp_now();
            filled = true;
        }
        if self.updated_at.is_empty() {
            self.updated_at = self.created_at.clone();
            filled = true;
        }
        filled
    }

    /// Returns a deep copy of this document, suitable for export or sharing.
    pub fn export(&self) -> Project {
        self.clone()
    }

    /// Deep-copies content under a new id, name and fresh timestamps.
    pub fn duplicate(&self, name: impl Into<String>) -> Project {
        let mut copy = Project::new(name);
        copy.options = self.options.clone();
        copy.criteria = self.criteria.clone();
        copy.evaluations = self.evaluations.clone();
        copy
    }

    pub fn option(&self, id: &str) -> Option<&OptionItem> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.id == id)
    }

    /// Reads one evaluation cell without applying any default.
    pub fn evaluation(&self, option_id: &str, criterion_id: &str) -> Option<f64> {
        self.evaluations
            .get(option_id)
            .and_then(|row| row.get(criterion_id))
            .copied()
    }

    /// Appends an option and seeds its row with `neutral` for every criterion.
    pub fn add_option(&mut self, name: impl Into<String>, neutral: f64) -> String {
        let id = generate_id();
        self.options.push(OptionItem {
            id: id.clone(),
            name: name.into(),
        });
        let row = self.evaluations.entry(id.clone()).or_default();
        for criterion in &self.criteria {
            row.insert(criterion.id.clone(), neutral);
        }
        id
    }

    /// Removes an option and its evaluation row. Returns `false` if absent.
    pub fn remove_option(&mut self, id: &str) -> bool {
        let Some(index) = self.options.iter().position(|option| option.id == id) else {
            return false;
        };
        self.options.remove(index);
        self.evaluations.remove(id);
        true
    }

    pub fn rename_option(&mut self, id: &str, name: impl Into<String>) -> bool {
        match self.options.iter_mut().find(|option| option.id == id) {
            Some(option) => {
                option.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Appends a criterion and seeds its column with `neutral` for every option.
    pub fn add_criterion(&mut self, name: impl Into<String>, weight: f64, neutral: f64) -> String {
        let id = generate_id();
        self.criteria.push(Criterion {
            id: id.clone(),
            name: name.into(),
            weight,
        });
        for option in &self.options {
            self.evaluations
                .entry(option.id.clone())
                .or_default()
                .insert(id.clone(), neutral);
        }
        id
    }

    /// Removes a criterion and its column from every row.
    pub fn remove_criterion(&mut self, id: &str) -> bool {
        let Some(index) = self
            .criteria
            .iter()
            .position(|criterion| criterion.id == id)
        else {
            return false;
        };
        self.criteria.remove(index);
        for row in self.evaluations.values_mut() {
            row.remove(id);
        }
        true
    }

    pub fn update_criterion(&mut self, id: &str, name: impl Into<String>, weight: f64) -> bool {
        match self
            .criteria
            .iter_mut()
            .find(|criterion| criterion.id == id)
        {
            Some(criterion) => {
                criterion.name = name.into();
                criterion.weight = weight;
                true
            }
            None => false,
        }
    }

    pub fn reorder_options(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.options, from, to)
    }

    pub fn reorder_criteria(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.criteria, from, to)
    }

    /// Sets or overwrites one cell, creating the option row when absent.
    pub fn set_evaluation(&mut self, option_id: &str, criterion_id: &str, value: f64) {
        self.evaluations
            .entry(option_id.to_string())
            .or_default()
            .insert(criterion_id.to_string(), value);
    }
}

/// Moves `items[from]` to index `to`, shifting the others.
///
/// Equivalent to removing at `from` and reinserting at `to`. Returns `false`
/// without mutating when `from` is out of range; `to` past the end is clamped
/// to the last index.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let target = to.min(items.len());
    items.insert(target, item);
    true
}

/// Persisted root: every project plus the active selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCollection {
    pub active_project_id: Option<String>,
    pub projects: BTreeMap<String, Project>,
}

impl ProjectCollection {
    pub fn active(&self) -> Option<&Project> {
        self.active_project_id
            .as_deref()
            .and_then(|id| self.projects.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Project> {
        let id = self.active_project_id.as_deref()?;
        self.projects.get_mut(id)
    }

    /// Inserts a project and makes it active.
    pub fn insert_active(&mut self, project: Project) {
        self.active_project_id = Some(project.id.clone());
        self.projects.insert(project.id.clone(), project);
    }
}

#[cfg(test)]
mod tests {
    use super::{move_item, Project};

    #[test]
    fn move_item_matches_remove_then_insert() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        assert!(move_item(&mut items, 3, 0));
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn move_item_rejects_source_out_of_range_and_clamps_target() {
        let mut items = vec![1, 2, 3];
        assert!(!move_item(&mut items, 3, 0));
        assert_eq!(items, vec![1, 2, 3]);

        assert!(move_item(&mut items, 0, 99));
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn adding_option_and_criterion_seeds_neutral_cells() {
        let mut project = Project::new("seed");
        let c1 = project.add_criterion("cost", 5.0, 3.0);
        let a = project.add_option("A", 3.0);
        let c2 = project.add_criterion("speed", 2.0, 3.0);

        assert_eq!(project.evaluation(&a, &c1), Some(3.0));
        assert_eq!(project.evaluation(&a, &c2), Some(3.0));
    }

    #[test]
    fn fill_missing_metadata_assigns_id_and_timestamps() {
        let mut project = Project::new("legacy");
        project.id.clear();
        project.created_at.clear();
        project.updated_at.clear();

        assert!(project.fill_missing_metadata());
        assert!(!project.id.is_empty());
        assert_eq!(project.created_at, project.updated_at);
        assert!(!project.fill_missing_metadata());
    }

    #[test]
    fn timestamps_use_millisecond_utc_format() {
        let project = Project::new("stamp");
        assert!(project.created_at.ends_with('Z'));
        assert_eq!(project.created_at.len(), "2024-01-01T12:00:00.000Z".len());
    }
}
