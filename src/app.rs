//! Steps the binary strings together: repository probe, category choice, migration run.

use migrator_schema::DiscussionCategory;
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::MigrationError;
use crate::github::{DiscussionsClient, Transport};
use crate::migration::{ExportData, ImageLinkRewriter, Journal, MigrationReport, MigrationTarget, Migrator};

/// `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.trim().is_empty() && !name.trim().is_empty() => Ok(Self {
                owner: owner.trim().to_string(),
                name: name.trim().to_string(),
            }),
            _ => Err(MigrationError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What the remote told us about the target repository.
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    pub id: String,
    pub categories: Vec<DiscussionCategory>,
}

impl RepositoryInfo {
    pub fn category(&self, name: &str) -> Result<&DiscussionCategory, MigrationError> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| MigrationError::CategoryNotFound(name.to_string()))
    }
}

pub async fn probe_repository<T: Transport>(
    client: &DiscussionsClient<T>,
    repo: &RepoSlug,
) -> Result<RepositoryInfo, MigrationError> {
    let id = client.get_repository_id(&repo.owner, &repo.name).await?;
    let categories = client
        .get_discussion_categories(&repo.owner, &repo.name)
        .await?;
    Ok(RepositoryInfo { id, categories })
}

/// Loads the export and migrates it into the configured category of `repo`.
pub async fn migrate<T: Transport>(
    client: &DiscussionsClient<T>,
    repo: &RepositoryInfo,
    cfg: &Config,
) -> Result<MigrationReport, MigrationError> {
    let category = repo.category(&cfg.migration.category)?;
    let export = ExportData::load(&cfg.basic.data_dir)?;

    let target = MigrationTarget {
        repository_id: repo.id.clone(),
        category_id: category.id.clone(),
    };
    let rewriter = ImageLinkRewriter::new(cfg.migration.image_path_prefix.as_str());
    let mut migrator = Migrator::new(client, target, &export.users, rewriter);
    if let Some(path) = cfg.migration.journal_path.as_deref() {
        let (journal, replayed) = Journal::open(path)?;
        migrator = migrator.with_journal(journal, replayed);
    }

    migrator.run(&export.posts).await
}
