//! Project collection persistence.
//!
//! # Responsibility
//! - Serialize the whole project collection into one durable storage slot.
//! - Recognize the legacy single-project layout and migrate it in place.
//! - Repair a missing or dangling active project id after load.
//!
//! # Invariants
//! - The stored blob is always the full collection; writes replace it whole.
//! - Legacy data is written back in the current format before
//!   `load_collection` returns. A failed write-back is logged and the
//!   migrated collection is still returned.
//! - After a successful load, `active_project_id` resolves.

use crate::model::project::{Project, ProjectCollection};
use crate::storage::{Storage, StorageError};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ACTIVE_ID_FIELD: &str = "activeProjectId";
const PROJECTS_FIELD: &str = "projects";

/// Failure while reading or writing the persisted collection.
#[derive(Debug)]
pub enum PersistError {
    /// Storage backend failure.
    Storage(StorageError),
    /// Nothing stored under the collection key.
    Missing,
    /// Stored text is not valid JSON, or the collection failed to encode.
    Json(serde_json::Error),
    /// Valid JSON that is neither a collection nor a single project.
    UnrecognizedShape(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Missing => write!(f, "no persisted project data"),
            Self::Json(err) => write!(f, "invalid persisted project json: {err}"),
            Self::UnrecognizedShape(details) => {
                write!(f, "unrecognized persisted document: {details}")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Missing | Self::UnrecognizedShape(_) => None,
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Layout the stored blob was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredFormat {
    /// `{ activeProjectId, projects }`.
    Current,
    /// Bare single-project document.
    Legacy,
}

/// Repair applied to the active project selection.
///
/// Every variant carries the id that is active afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealAction {
    /// Active id already resolved.
    Kept(String),
    /// Active id re-pointed at an existing project.
    SelectedExisting(String),
    /// Collection was empty; a new empty project was created and activated.
    CreatedEmpty(String),
}

impl HealAction {
    pub fn is_repair(&self) -> bool {
        !matches!(self, Self::Kept(_))
    }

    pub fn into_active_id(self) -> String {
        match self {
            Self::Kept(id) | Self::SelectedExisting(id) | Self::CreatedEmpty(id) => id,
        }
    }
}

/// Result of a successful `load_collection`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCollection {
    pub collection: ProjectCollection,
    pub format: StoredFormat,
    pub heal: HealAction,
}

/// Encodes the collection as the stored JSON text.
pub fn serialize_collection(collection: &ProjectCollection) -> Result<String, PersistError> {
    Ok(serde_json::to_string(collection)?)
}

/// Decodes stored JSON text in either layout.
///
/// Current-format text must carry both `activeProjectId` and `projects`.
/// Anything else is read as a legacy project document, which is wrapped into
/// a single-entry collection with that project active. A legacy document
/// without an id gets a generated one.
pub fn parse_collection(text: &str) -> Result<(ProjectCollection, StoredFormat), PersistError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object() else {
        return Err(PersistError::UnrecognizedShape(
            "top-level value is not an object".to_string(),
        ));
    };

    if object.contains_key(ACTIVE_ID_FIELD) && object.contains_key(PROJECTS_FIELD) {
        let collection: ProjectCollection = serde_json::from_value(value)?;
        return Ok((collection, StoredFormat::Current));
    }

    let mut project: Project = serde_json::from_value(value)
        .map_err(|err| PersistError::UnrecognizedShape(format!("not a project document: {err}")))?;
    project.fill_missing_metadata();

    let mut collection = ProjectCollection::default();
    collection.insert_active(project);
    Ok((collection, StoredFormat::Legacy))
}

/// Makes `active_project_id` resolve, creating a project when none exist.
///
/// Picks the first project in key order when the active id is missing or
/// dangling.
pub fn heal_active(collection: &mut ProjectCollection, default_name: &str) -> HealAction {
    if let Some(active) = collection.active() {
        return HealAction::Kept(active.id.clone());
    }

    if let Some(first_id) = collection.projects.keys().next().cloned() {
        collection.active_project_id = Some(first_id.clone());
        return HealAction::SelectedExisting(first_id);
    }

    let project = Project::new(default_name);
    let id = project.id.clone();
    collection.insert_active(project);
    HealAction::CreatedEmpty(id)
}

/// Writes the collection under `key`.
pub fn save_collection<S: Storage>(
    storage: &mut S,
    key: &str,
    collection: &ProjectCollection,
) -> Result<(), PersistError> {
    let text = serialize_collection(collection)?;
    storage.set(key, &text)?;
    Ok(())
}

/// Reads, migrates and heals the collection stored under `key`.
///
/// # Side effects
/// - Legacy data is re-written in the current format, best effort.
/// - Emits `store_load`, `legacy_migration` and `active_self_heal` events.
pub fn load_collection<S: Storage>(
    storage: &mut S,
    key: &str,
    default_name: &str,
) -> Result<LoadedCollection, PersistError> {
    let text = storage.get(key)?.ok_or(PersistError::Missing)?;
    let (mut collection, format) = match parse_collection(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                "event=store_load module=persistence status=error bytes={} error={}",
                text.len(),
                err
            );
            return Err(err);
        }
    };

    if format == StoredFormat::Legacy {
        let project_id = collection.active_project_id.as_deref().unwrap_or_default();
        match save_collection(storage, key, &collection) {
            Ok(()) => info!(
                "event=legacy_migration module=persistence status=ok project_id={project_id}"
            ),
            Err(err) => warn!(
                "event=legacy_migration module=persistence status=error project_id={project_id} error={err}"
            ),
        }
    }

    let heal = heal_active(&mut collection, default_name);
    if heal.is_repair() {
        warn!(
            "event=active_self_heal module=persistence status=ok action={:?}",
            heal
        );
    }

    info!(
        "event=store_load module=persistence status=ok format={:?} projects={}",
        format,
        collection.projects.len()
    );
    Ok(LoadedCollection {
        collection,
        format,
        heal,
    })
}
