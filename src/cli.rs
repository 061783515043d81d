use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "discussions-migrator")]
#[command(about = "Migrate a Stack Overflow for Teams export into GitHub Discussions", long_about = None)]
#[command(version)]
#[command(after_help = "Example usage:
  discussions-migrator --token YOUR_GITHUB_TOKEN
  discussions-migrator --token YOUR_GITHUB_TOKEN --repo owner/repo-name
  discussions-migrator --token YOUR_GITHUB_TOKEN --repo owner/repo-name --migrate")]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository in format owner/name (e.g., octocat/Hello-World)
    #[arg(long)]
    pub repo: Option<String>,

    /// Migrate the export into the repository after listing its categories
    #[arg(long, requires = "repo")]
    pub migrate: bool,

    /// Configuration file (defaults to ./migrator.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the export JSON files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Discussion category receiving migrated posts
    #[arg(long)]
    pub category: Option<String>,

    /// Journal file enabling resumable runs
    #[arg(long)]
    pub journal: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over the configuration file.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.data_dir {
            cfg.basic.data_dir.clone_from(dir);
        }
        if let Some(category) = &self.category {
            cfg.migration.category.clone_from(category);
        }
        if let Some(journal) = &self.journal {
            cfg.migration.journal_path = Some(journal.clone());
        }
    }
}
