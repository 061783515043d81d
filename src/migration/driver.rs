use migrator_schema::{NodeRef, Post, PostType, User};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::journal::{EntryKind, Journal, JournalEntry};
use super::markdown::ImageLinkRewriter;
use crate::error::MigrationError;
use crate::github::{DiscussionsClient, Transport};

/// Where migrated questions and articles land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationTarget {
    pub repository_id: String,
    pub category_id: String,
}

/// Correlation map value: the discussion created for a source question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedQuestion {
    pub discussion: NodeRef,
    pub accepted_answer_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub discussions_created: usize,
    pub comments_created: usize,
    pub answers_marked: usize,
    pub posts_skipped: usize,
    pub posts_resumed: usize,
}

/// Walks the export posts once, in order, one remote call at a time.
///
/// A question's discussion is recorded in the correlation map before any later answer is looked
/// up, so answers must follow their question in the input. Data problems (unknown parent, unknown
/// author) are logged and skipped; remote failures abort the run.
pub struct Migrator<'a, T> {
    client: &'a DiscussionsClient<T>,
    target: MigrationTarget,
    users: &'a HashMap<i64, User>,
    rewriter: ImageLinkRewriter,
    journal: Option<Journal>,
    questions: HashMap<i64, MigratedQuestion>,
    resumed_discussions: HashMap<i64, NodeRef>,
    resumed_comments: HashMap<i64, NodeRef>,
    resumed_answers: HashSet<i64>,
    report: MigrationReport,
}

impl<'a, T: Transport> Migrator<'a, T> {
    pub fn new(
        client: &'a DiscussionsClient<T>,
        target: MigrationTarget,
        users: &'a HashMap<i64, User>,
        rewriter: ImageLinkRewriter,
    ) -> Self {
        Self {
            client,
            target,
            users,
            rewriter,
            journal: None,
            questions: HashMap::new(),
            resumed_discussions: HashMap::new(),
            resumed_comments: HashMap::new(),
            resumed_answers: HashSet::new(),
            report: MigrationReport::default(),
        }
    }

    /// Records every creation in `journal` and skips work already listed in `replayed`.
    #[must_use]
    pub fn with_journal(mut self, journal: Journal, replayed: Vec<JournalEntry>) -> Self {
        for entry in replayed {
            let node = NodeRef {
                id: entry.id,
                url: entry.url,
            };
            match entry.kind {
                EntryKind::Discussion => {
                    self.resumed_discussions.insert(entry.post_id, node);
                }
                EntryKind::Comment => {
                    self.resumed_comments.insert(entry.post_id, node);
                }
                EntryKind::Answer => {
                    self.resumed_answers.insert(entry.post_id);
                }
            }
        }
        self.journal = Some(journal);
        self
    }

    /// Question id -> created discussion, as built so far.
    pub fn correlation(&self) -> &HashMap<i64, MigratedQuestion> {
        &self.questions
    }

    pub async fn run(&mut self, posts: &[Post]) -> Result<MigrationReport, MigrationError> {
        info!(posts = posts.len(), "Starting migration");

        for post in posts {
            if post.is_discussion_root() {
                self.migrate_root(post).await?;
            } else if post.post_type == PostType::Answer {
                self.migrate_answer(post).await?;
            } else {
                debug!(post.id = post.id, "Skipping post of unsupported type");
                self.report.posts_skipped += 1;
            }
        }

        info!(
            discussions = self.report.discussions_created,
            comments = self.report.comments_created,
            answers_marked = self.report.answers_marked,
            skipped = self.report.posts_skipped,
            resumed = self.report.posts_resumed,
            "Migration finished"
        );
        Ok(self.report)
    }

    async fn migrate_root(&mut self, post: &Post) -> Result<(), MigrationError> {
        if let Some(discussion) = self.resumed_discussions.remove(&post.id) {
            debug!(
                post.id = post.id,
                discussion.id = %discussion.id,
                "Discussion already migrated"
            );
            self.remember_question(post, discussion);
            self.report.posts_resumed += 1;
            return Ok(());
        }

        let Some(author) = self.users.get(&post.owner_user_id) else {
            warn!(
                post.id = post.id,
                owner_user_id = post.owner_user_id,
                "No user found for post owner, skipping post"
            );
            self.report.posts_skipped += 1;
            return Ok(());
        };

        let title = match post.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                warn!(post.id = post.id, "Post has no title, using a placeholder");
                format!("Untitled post {}", post.id)
            }
        };
        let body = format!(
            "Written by {}\n{}",
            author.attribution_name(),
            self.rewriter.rewrite(post.source_body())
        );

        let discussion = self
            .client
            .create_discussion(
                &self.target.repository_id,
                &self.target.category_id,
                &title,
                &body,
            )
            .await?;
        self.report.discussions_created += 1;
        self.journal(EntryKind::Discussion, post.id, &discussion)?;
        self.remember_question(post, discussion);
        Ok(())
    }

    /// Creates the comment and journals it before marking, so a failed mark leaves only the
    /// mark to redo on the next run.
    async fn migrate_answer(&mut self, post: &Post) -> Result<(), MigrationError> {
        let parent = post
            .parent_id
            .and_then(|parent_id| self.questions.get(&parent_id));
        let Some(parent) = parent else {
            warn!(
                post.id = post.id,
                parent_id = ?post.parent_id,
                "No discussion found for answer's parent question, skipping answer"
            );
            self.report.posts_skipped += 1;
            return Ok(());
        };

        let mark_as_answer = parent.accepted_answer_id == Some(post.id);
        let discussion_id = parent.discussion.id.clone();

        let comment = if let Some(comment) = self.resumed_comments.remove(&post.id) {
            debug!(post.id = post.id, comment.id = %comment.id, "Answer already migrated");
            self.report.posts_resumed += 1;
            comment
        } else {
            let body = self.rewriter.rewrite(post.source_body());
            let comment = self
                .client
                .create_comment(&discussion_id, &body, false)
                .await?;
            self.report.comments_created += 1;
            self.journal(EntryKind::Comment, post.id, &comment)?;
            comment
        };

        if mark_as_answer && !self.resumed_answers.contains(&post.id) {
            self.client.mark_comment_as_answer(&comment.id).await?;
            self.report.answers_marked += 1;
            self.journal(EntryKind::Answer, post.id, &comment)?;
        }
        Ok(())
    }

    fn remember_question(&mut self, post: &Post, discussion: NodeRef) {
        self.questions.insert(
            post.id,
            MigratedQuestion {
                discussion,
                accepted_answer_id: post.accepted_answer_id,
            },
        );
    }

    fn journal(
        &mut self,
        kind: EntryKind,
        post_id: i64,
        node: &NodeRef,
    ) -> Result<(), MigrationError> {
        let Some(journal) = self.journal.as_mut() else {
            return Ok(());
        };
        journal.append(&JournalEntry {
            kind,
            post_id,
            id: node.id.clone(),
            url: node.url.clone(),
        })
    }
}
