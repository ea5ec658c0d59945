//! Store configuration.
//!
//! # Responsibility
//! - Name the durable storage slots and the defaults applied to new content.
//!
//! # Invariants
//! - Every field has a default; a partial config document is valid.

use crate::scoring::NEUTRAL_SCORE;
use serde::Deserialize;

/// Storage key holding the JSON project collection.
pub const PROJECTS_KEY: &str = "comparison-tool-projects";
/// Storage key holding the last consumed share token.
pub const LAST_URL_KEY: &str = "comparison-tool-last-url";
/// Name given to projects created without an explicit name.
pub const DEFAULT_PROJECT_NAME: &str = "New Project";
/// Weight given to criteria created without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 5.0;

/// Keys and defaults used by `ProjectStore` and the load orchestrator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StoreConfig {
    pub projects_key: String,
    pub last_url_key: String,
    pub default_project_name: String,
    pub default_weight: f64,
    pub neutral_score: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            projects_key: PROJECTS_KEY.to_string(),
            last_url_key: LAST_URL_KEY.to_string(),
            default_project_name: DEFAULT_PROJECT_NAME.to_string(),
            default_weight: DEFAULT_WEIGHT,
            neutral_score: NEUTRAL_SCORE,
        }
    }
}

impl StoreConfig {
    /// Parses a JSON config document, defaulting every missing field.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = StoreConfig::from_json(r#"{"default_weight": 2}"#).unwrap();
        assert_eq!(config.default_weight, 2.0);
        assert_eq!(config.projects_key, "comparison-tool-projects");
        assert_eq!(config.neutral_score, 3.0);
    }
}
