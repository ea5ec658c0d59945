//! Core domain logic for the decision matrix.
//! This crate is the single source of truth for scoring, project storage
//! and share-link invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod scoring;
pub mod session;
pub mod share;
pub mod storage;
pub mod store;

pub use config::{StoreConfig, LAST_URL_KEY, PROJECTS_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::generate_id;
pub use model::project::{Criterion, EvaluationMatrix, OptionItem, Project, ProjectCollection};
pub use persistence::{PersistError, StoredFormat};
pub use scoring::engine::{compute_scores, OptionScore, ScoreTable};
pub use scoring::ranking::{rank_options, RankedOption};
pub use scoring::NEUTRAL_SCORE;
pub use session::clipboard::{Clipboard, ClipboardError};
pub use session::loader::{orchestrate_load, LoadOutcome, LoadSource};
pub use session::location::{Location, UrlLocation};
pub use session::Session;
pub use share::codec::{decode as decode_share_token, encode as encode_share_token, ShareCodecError};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError};
pub use store::project_store::{ProjectStore, ProjectSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
