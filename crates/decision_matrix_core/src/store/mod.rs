//! In-memory project collection and its mutation API.

pub mod project_store;
