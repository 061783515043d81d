use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Migration target and rewriting options managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Name of the discussion category receiving migrated questions and articles.
    /// TOML: `migration.category`. Default: `Q&A`.
    #[serde(default = "default_category")]
    pub category: String,

    /// Replacement prefix for rewritten image links, relative to a discussion page.
    /// TOML: `migration.image_path_prefix`. Default: `../blob/main/images/`.
    #[serde(default = "default_image_path_prefix")]
    pub image_path_prefix: String,

    /// Append-only log of created discussions/comments; enables resuming an interrupted run.
    /// TOML: `migration.journal_path`. Default: unset (no resumption).
    #[serde(default)]
    pub journal_path: Option<PathBuf>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            image_path_prefix: default_image_path_prefix(),
            journal_path: None,
        }
    }
}

fn default_category() -> String {
    "Q&A".to_string()
}

fn default_image_path_prefix() -> String {
    "../blob/main/images/".to_string()
}
