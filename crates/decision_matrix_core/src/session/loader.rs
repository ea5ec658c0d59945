//! Startup load orchestration.
//!
//! # Responsibility
//! - Decide whether a session hydrates from a share link, from durable
//!   storage, or reports that the caller should seed placeholder content.
//!
//! # Invariants
//! - Sources win strictly in order: url, local, sample.
//! - Local data counts only when the stored collection loads; an unreadable
//!   blob never blocks a share link.
//! - A share token equal to the last consumed one is skipped while local
//!   data loads, so a refresh never clobbers local edits.
//! - A shared project joins the loaded local collection rather than
//!   replacing it.
//! - A consumed token is recorded and stripped from the location.
//! - Orchestration never fails; every error degrades to the next source.

use crate::session::location::Location;
use crate::share::codec::decode;
use crate::share::link::share_token_from_fragment;
use crate::storage::Storage;
use crate::store::project_store::ProjectStore;
use log::{info, warn};

/// Where the session's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Url,
    Local,
    /// Nothing loaded; the caller should seed placeholder content.
    Sample,
}

/// Result of `orchestrate_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub source: LoadSource,
    pub loaded: bool,
}

impl LoadOutcome {
    fn loaded(source: LoadSource) -> Self {
        Self {
            source,
            loaded: true,
        }
    }
}

/// Hydrates `store` from the first source that yields data.
pub fn orchestrate_load<S: Storage, L: Location + ?Sized>(
    store: &mut ProjectStore<S>,
    location: &mut L,
) -> LoadOutcome {
    let local = match store.load() {
        Ok(format) => Some(format),
        Err(err) => {
            info!("event=load_orchestrate module=session status=skip source=local reason={err}");
            None
        }
    };

    if load_from_share_link(store, location, local.is_some()) {
        info!("event=load_orchestrate module=session status=ok source=url");
        return LoadOutcome::loaded(LoadSource::Url);
    }

    if let Some(format) = local {
        info!("event=load_orchestrate module=session status=ok source=local format={format:?}");
        return LoadOutcome::loaded(LoadSource::Local);
    }

    info!("event=load_orchestrate module=session status=ok source=sample");
    LoadOutcome {
        source: LoadSource::Sample,
        loaded: false,
    }
}

/// Imports the shared project, if any, on top of whatever `store` holds.
fn load_from_share_link<S: Storage, L: Location + ?Sized>(
    store: &mut ProjectStore<S>,
    location: &mut L,
    has_local: bool,
) -> bool {
    let Some(fragment) = location.fragment() else {
        return false;
    };
    let Some(token) = share_token_from_fragment(&fragment) else {
        return false;
    };

    let last_url_key = store.config().last_url_key.clone();
    let last_consumed = read_slot(store, &last_url_key);

    if has_local && last_consumed.as_deref() == Some(token) {
        info!(
            "event=load_orchestrate module=session status=skip source=url reason=already_consumed token_len={}",
            token.len()
        );
        return false;
    }

    let Ok(project) = decode(token) else {
        return false;
    };

    let project_id = store.import_project(project);
    if let Err(err) = store.storage_mut().set(&last_url_key, token) {
        warn!("event=load_orchestrate module=session status=error step=record_token error={err}");
    }
    location.clear_fragment();

    info!(
        "event=share_import module=session status=ok project_id={} token_len={}",
        project_id,
        token.len()
    );
    true
}

fn read_slot<S: Storage>(store: &ProjectStore<S>, key: &str) -> Option<String> {
    match store.storage().get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=storage_read module=session status=error key={key} error={err}");
            None
        }
    }
}
