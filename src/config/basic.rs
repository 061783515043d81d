use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`. `RUST_LOG` takes precedence.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Directory holding the export JSON files (`posts.json`, `users.json`, ...).
    /// TOML: `basic.data_dir`. Default: `data`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: default_loglevel(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
