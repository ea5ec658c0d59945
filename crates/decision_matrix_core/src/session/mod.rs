//! Session context.
//!
//! # Responsibility
//! - Hold the one project store and location for a running session.
//! - Run startup load orchestration and produce share links.
//!
//! # Invariants
//! - A session is constructed explicitly and handed to callers; there is no
//!   ambient global instance.
//! - All mutation happens through `&mut Session`, so no locking is needed.

pub mod clipboard;
pub mod loader;
pub mod location;

use crate::share::codec::encode;
use crate::share::link::compose_share_url;
use crate::storage::Storage;
use crate::store::project_store::ProjectStore;
use clipboard::{copy_text, Clipboard};
use loader::{orchestrate_load, LoadOutcome};
use location::Location;
use log::error;

/// Process-lifetime context: one store plus the address it was opened at.
pub struct Session<S: Storage, L: Location> {
    store: ProjectStore<S>,
    location: L,
}

impl<S: Storage, L: Location> Session<S, L> {
    pub fn new(store: ProjectStore<S>, location: L) -> Self {
        Self { store, location }
    }

    pub fn store(&self) -> &ProjectStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectStore<S> {
        &mut self.store
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Runs load orchestration against the session's location.
    pub fn start(&mut self) -> LoadOutcome {
        orchestrate_load(&mut self.store, &mut self.location)
    }

    /// Shareable link for the active project, `<base>#share=<token>`.
    pub fn share_url(&self) -> Option<String> {
        let project = self.store.active_project()?;
        match encode(project) {
            Ok(token) => Some(compose_share_url(&self.location.base_url(), &token)),
            Err(err) => {
                error!("event=share_encode module=session status=error error={err}");
                None
            }
        }
    }

    /// Copies the active project's share link to the clipboard.
    pub fn copy_share_url<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> bool {
        match self.share_url() {
            Some(url) => copy_text(clipboard, &url),
            None => false,
        }
    }

    pub fn into_parts(self) -> (ProjectStore<S>, L) {
        (self.store, self.location)
    }
}
