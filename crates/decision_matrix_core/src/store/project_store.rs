//! Project store.
//!
//! # Responsibility
//! - Own the in-memory project collection for one session.
//! - Expose option/criterion/evaluation mutators scoped to the active
//!   project, plus project create/duplicate/switch/delete/rename.
//! - Persist the collection after every mutation.
//!
//! # Invariants
//! - Every active-project mutator runs through `mutate_active`, which
//!   guarantees an active project before the change and persists after it.
//! - `remove_*` and `set_evaluation` stamp `updated_at` even when nothing
//!   matched; `update_*` and `reorder_*` stamp only when applied.
//! - The collection never ends a public call with a dangling active id.

use crate::config::StoreConfig;
use crate::model::id::generate_id;
use crate::model::project::{Project, ProjectCollection};
use crate::model::sample::populate_sample;
use crate::persistence::{
    heal_active, load_collection, save_collection, PersistError, StoredFormat,
};
use crate::scoring::engine::{score_project, ScoreTable};
use crate::scoring::ranking::{rank_options, RankedOption};
use crate::storage::Storage;
use log::{debug, error, info};

/// Project-switcher row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub option_count: usize,
    pub criteria_count: usize,
    pub is_active: bool,
}

/// Whether a mutation should refresh `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stamp {
    Touch,
    Skip,
}

impl Stamp {
    fn when(applied: bool) -> Self {
        if applied {
            Self::Touch
        } else {
            Self::Skip
        }
    }
}

/// Session-wide owner of the project collection.
pub struct ProjectStore<S: Storage> {
    storage: S,
    config: StoreConfig,
    collection: ProjectCollection,
}

impl<S: Storage> ProjectStore<S> {
    /// Creates an empty store over `storage` with default configuration.
    ///
    /// Nothing is read from storage until `load` is called.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            collection: ProjectCollection::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn collection(&self) -> &ProjectCollection {
        &self.collection
    }

    pub fn active_project_id(&self) -> Option<&str> {
        self.collection.active_project_id.as_deref()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.collection.active()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.collection.projects.get(id)
    }

    /// Lists projects, most recently updated first.
    pub fn list_projects(&self) -> Vec<ProjectSummary> {
        let active_id = self.active_project_id();
        let mut summaries: Vec<ProjectSummary> = self
            .collection
            .projects
            .values()
            .map(|project| ProjectSummary {
                id: project.id.clone(),
                name: project.name.clone(),
                created_at: project.created_at.clone(),
                updated_at: project.updated_at.clone(),
                option_count: project.options.len(),
                criteria_count: project.criteria.len(),
                is_active: active_id == Some(project.id.as_str()),
            })
            .collect();
        summaries.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        summaries
    }

    /// Weighted scores of the active project; empty when none is active.
    pub fn results(&self) -> ScoreTable {
        self.active_project()
            .map(|project| score_project(project, self.config.neutral_score))
            .unwrap_or_default()
    }

    /// Active project options ranked by rounded score.
    pub fn ranked_options(&self) -> Vec<RankedOption> {
        match self.active_project() {
            Some(project) => rank_options(&project.options, &self.results()),
            None => Vec::new(),
        }
    }

    /// Deep copy of the active project document.
    pub fn export_active(&self) -> Option<Project> {
        self.active_project().map(Project::export)
    }

    pub fn add_option(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        self.mutate_active("add_option", |project, config| {
            (project.add_option(name, config.neutral_score), Stamp::Touch)
        })
    }

    pub fn remove_option(&mut self, id: &str) -> bool {
        self.mutate_active("remove_option", |project, _| {
            (project.remove_option(id), Stamp::Touch)
        })
    }

    pub fn update_option(&mut self, id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        self.mutate_active("update_option", |project, _| {
            let found = project.rename_option(id, name);
            (found, Stamp::when(found))
        })
    }

    /// Moves the option at `from` to `to`.
    ///
    /// Returns `false` when `from` is out of range; `to` is clamped.
    pub fn reorder_options(&mut self, from: usize, to: usize) -> bool {
        self.mutate_active("reorder_options", |project, _| {
            let moved = project.reorder_options(from, to);
            (moved, Stamp::when(moved))
        })
    }

    /// Appends a criterion; `weight` defaults to the configured default.
    pub fn add_criteria(&mut self, name: impl Into<String>, weight: Option<f64>) -> String {
        let name = name.into();
        self.mutate_active("add_criteria", |project, config| {
            let weight = weight.unwrap_or(config.default_weight);
            (
                project.add_criterion(name, weight, config.neutral_score),
                Stamp::Touch,
            )
        })
    }

    pub fn remove_criteria(&mut self, id: &str) -> bool {
        self.mutate_active("remove_criteria", |project, _| {
            (project.remove_criterion(id), Stamp::Touch)
        })
    }

    pub fn update_criteria(&mut self, id: &str, name: impl Into<String>, weight: f64) -> bool {
        let name = name.into();
        self.mutate_active("update_criteria", |project, _| {
            let found = project.update_criterion(id, name, weight);
            (found, Stamp::when(found))
        })
    }

    pub fn reorder_criteria(&mut self, from: usize, to: usize) -> bool {
        self.mutate_active("reorder_criteria", |project, _| {
            let moved = project.reorder_criteria(from, to);
            (moved, Stamp::when(moved))
        })
    }

    pub fn set_evaluation(&mut self, option_id: &str, criteria_id: &str, value: f64) {
        self.mutate_active("set_evaluation", |project, _| {
            project.set_evaluation(option_id, criteria_id, value);
            ((), Stamp::Touch)
        })
    }

    /// Appends placeholder options and criteria to the active project.
    pub fn seed_sample(&mut self) {
        self.mutate_active("seed_sample", |project, config| {
            populate_sample(project, config.neutral_score);
            ((), Stamp::Touch)
        })
    }

    /// Creates an empty project, activates it and returns its id.
    pub fn create_new_project(&mut self, name: Option<&str>) -> String {
        let name = name.unwrap_or(self.config.default_project_name.as_str());
        let project = Project::new(name);
        let id = project.id.clone();
        self.collection.insert_active(project);
        debug!("event=project_create module=store status=ok project_id={id}");
        self.persist();
        id
    }

    /// Deep-copies `source_id` under a fresh id and activates the copy.
    ///
    /// Returns `None` when the source does not exist.
    pub fn duplicate_project(&mut self, source_id: &str, new_name: Option<&str>) -> Option<String> {
        let source = self.collection.projects.get(source_id)?;
        let name = match new_name {
            Some(name) => name.to_string(),
            None => format!("{} (Copy)", source.name),
        };
        let copy = source.duplicate(name);
        let id = copy.id.clone();
        self.collection.insert_active(copy);
        debug!(
            "event=project_duplicate module=store status=ok source_id={source_id} project_id={id}"
        );
        self.persist();
        Some(id)
    }

    pub fn switch_project(&mut self, id: &str) -> bool {
        if !self.collection.projects.contains_key(id) {
            return false;
        }
        self.collection.active_project_id = Some(id.to_string());
        self.persist();
        true
    }

    /// Deletes a project; deleting the active one activates a successor or
    /// a new empty project.
    pub fn delete_project(&mut self, id: &str) -> bool {
        if self.collection.projects.remove(id).is_none() {
            return false;
        }
        if self.active_project_id() == Some(id) {
            self.collection.active_project_id = None;
            let heal = heal_active(&mut self.collection, &self.config.default_project_name);
            debug!(
                "event=project_delete module=store status=ok project_id={id} successor={heal:?}"
            );
        } else {
            debug!("event=project_delete module=store status=ok project_id={id}");
        }
        self.persist();
        true
    }

    pub fn update_project_name(&mut self, id: &str, name: impl Into<String>) -> bool {
        let Some(project) = self.collection.projects.get_mut(id) else {
            return false;
        };
        project.name = name.into();
        project.touch();
        self.persist();
        true
    }

    /// Adds a foreign project document and activates it.
    ///
    /// Keeps the incoming id unless it is empty or already taken locally, in
    /// which case a fresh id is allocated. Returns the stored id.
    pub fn import_project(&mut self, mut project: Project) -> String {
        project.fill_missing_metadata();
        if self.collection.projects.contains_key(&project.id) {
            let fresh_id = generate_id();
            debug!(
                "event=project_import module=store status=rekey from_id={} to_id={}",
                project.id, fresh_id
            );
            project.id = fresh_id;
        }
        let id = project.id.clone();
        self.collection.insert_active(project);
        self.persist();
        id
    }

    /// Writes the full collection to storage.
    pub fn save(&mut self) -> Result<(), PersistError> {
        save_collection(
            &mut self.storage,
            &self.config.projects_key,
            &self.collection,
        )?;
        debug!(
            "event=store_save module=store status=ok projects={}",
            self.collection.projects.len()
        );
        Ok(())
    }

    /// Replaces in-memory state with the stored collection.
    ///
    /// On failure the in-memory state is left untouched.
    pub fn load(&mut self) -> Result<StoredFormat, PersistError> {
        let loaded = load_collection(
            &mut self.storage,
            &self.config.projects_key,
            &self.config.default_project_name,
        )?;
        self.collection = loaded.collection;
        Ok(loaded.format)
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            error!("event=store_save module=store status=error error={err}");
        }
    }

    /// Ensures an active project, applies `op` to it, stamps and persists.
    fn mutate_active<T>(
        &mut self,
        op_name: &str,
        op: impl FnOnce(&mut Project, &StoreConfig) -> (T, Stamp),
    ) -> T {
        let heal = heal_active(&mut self.collection, &self.config.default_project_name);
        if heal.is_repair() {
            info!("event=active_self_heal module=store status=ok op={op_name} action={heal:?}");
        }

        let default_name = &self.config.default_project_name;
        let project = self
            .collection
            .projects
            .entry(heal.into_active_id())
            .or_insert_with_key(|id| Project::with_id(id.clone(), default_name.as_str()));
        let (value, stamp) = op(project, &self.config);
        if stamp == Stamp::Touch {
            project.touch();
        }
        debug!(
            "event=project_mutate module=store status=ok op={op_name} stamped={}",
            stamp == Stamp::Touch
        );

        self.persist();
        value
    }
}
