mod basic;
mod github;
mod migration;

pub use basic::BasicConfig;
pub use github::GithubConfig;
pub use migration::MigrationConfig;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Logging and input locations (see `basic` table in migrator.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// GraphQL endpoint, pacing and retry settings (see `github` table).
    #[serde(default)]
    pub github: GithubConfig,

    /// Migration target and body rewriting (see `migration` table).
    #[serde(default)]
    pub migration: MigrationConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "migrator.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file when it exists.
    pub fn figment(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        }
    }

    /// Loads configuration from `path` (or `migrator.toml`), falling back to defaults when the
    /// file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Self::figment(&path).extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_file() {
        let cfg = Config::load(Some(Path::new("does-not-exist.toml"))).expect("defaults");

        assert_eq!(cfg.basic.loglevel, "info");
        assert_eq!(cfg.basic.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.github.api_url.as_str(), "https://api.github.com/graphql");
        assert_eq!(cfg.github.max_attempts, 4);
        assert_eq!(cfg.github.retry_base_delay_secs, 5);
        assert_eq!(cfg.github.calls_per_hour, 5000);
        assert_eq!(cfg.migration.category, "Q&A");
        assert_eq!(cfg.migration.image_path_prefix, "../blob/main/images/");
        assert!(cfg.migration.journal_path.is_none());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
[basic]
loglevel = "debug"

[github]
max_attempts = 2
api_url = "http://127.0.0.1:9000/graphql"

[migration]
category = "Ideas"
journal_path = "run.jsonl"
"#
        )
        .expect("write config");

        let cfg = Config::load(Some(file.path())).expect("load config");

        assert_eq!(cfg.basic.loglevel, "debug");
        assert_eq!(cfg.basic.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.github.max_attempts, 2);
        assert_eq!(cfg.github.retry_base_delay_secs, 5);
        assert_eq!(cfg.github.api_url.as_str(), "http://127.0.0.1:9000/graphql");
        assert_eq!(cfg.migration.category, "Ideas");
        assert_eq!(cfg.migration.journal_path, Some(PathBuf::from("run.jsonl")));
    }

    #[test]
    fn unknown_github_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[github]\nretries = 9").expect("write config");

        assert!(Config::load(Some(file.path())).is_err());
    }
}
