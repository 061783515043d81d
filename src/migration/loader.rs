use migrator_schema::{Account, Badge, Comment, Image, Post, Tag, User};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::ExportError;

pub const POSTS_FILE: &str = "posts.json";
pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const BADGES_FILE: &str = "badges.json";
pub const COMMENTS_FILE: &str = "comments.json";
pub const IMAGES_FILE: &str = "images.json";
pub const USERS_FILE: &str = "users.json";
pub const TAGS_FILE: &str = "tags.json";

/// Everything read from one export directory. Posts keep their file order.
#[derive(Debug, Default)]
pub struct ExportData {
    pub posts: Vec<Post>,
    /// `accountId -> verifiedEmail`
    pub accounts: HashMap<i64, String>,
    pub badges: Vec<Badge>,
    pub comments: Vec<Comment>,
    pub images: Vec<Image>,
    /// `userId -> User`
    pub users: HashMap<i64, User>,
    pub tags: Vec<Tag>,
}

impl ExportData {
    /// Loads all seven export files from `dir`. Any missing or malformed file is an error.
    pub fn load(dir: &Path) -> Result<Self, ExportError> {
        let posts: Vec<Post> = load_json(&dir.join(POSTS_FILE))?;
        let accounts: Vec<Account> = load_json(&dir.join(ACCOUNTS_FILE))?;
        let badges: Vec<Badge> = load_json(&dir.join(BADGES_FILE))?;
        let comments: Vec<Comment> = load_json(&dir.join(COMMENTS_FILE))?;
        let images: Vec<Image> = load_json(&dir.join(IMAGES_FILE))?;
        let users: Vec<User> = load_json(&dir.join(USERS_FILE))?;
        let tags: Vec<Tag> = load_json(&dir.join(TAGS_FILE))?;

        info!(
            dir = %dir.display(),
            posts = posts.len(),
            accounts = accounts.len(),
            badges = badges.len(),
            comments = comments.len(),
            images = images.len(),
            users = users.len(),
            tags = tags.len(),
            "Loaded export"
        );

        Ok(Self {
            posts,
            accounts: accounts
                .into_iter()
                .map(|a| (a.account_id, a.verified_email))
                .collect(),
            badges,
            comments,
            images,
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            tags,
        })
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let raw = std::fs::read(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ExportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
