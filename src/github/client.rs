use migrator_schema::{
    AddDiscussionCommentData, CreateDiscussionData, DiscussionCategoriesData, DiscussionCategory,
    MarkCommentAsAnswerData, NodeRef, RepositoryIdData,
};
use serde::de::DeserializeOwned;
use tracing::info;

use super::executor::RetryingExecutor;
use super::operation::Operation;
use super::transport::Transport;
use crate::error::GithubError;

/// Typed GitHub Discussions operations on top of a [`RetryingExecutor`].
pub struct DiscussionsClient<T> {
    executor: RetryingExecutor<T>,
}

impl<T: Transport> DiscussionsClient<T> {
    pub fn new(executor: RetryingExecutor<T>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &RetryingExecutor<T> {
        &self.executor
    }

    pub async fn get_repository_id(&self, owner: &str, name: &str) -> Result<String, GithubError> {
        let data: RepositoryIdData = self
            .run(&Operation::read_repository_id(owner, name))
            .await?;
        data.repository
            .map(|repo| repo.id)
            .ok_or_else(|| missing_repository(owner, name))
    }

    pub async fn get_discussion_categories(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<DiscussionCategory>, GithubError> {
        let data: DiscussionCategoriesData =
            self.run(&Operation::read_categories(owner, name)).await?;
        data.into_categories()
            .ok_or_else(|| missing_repository(owner, name))
    }

    /// Creates one discussion. No idempotency key exists upstream, so a resend after an applied
    /// create duplicates the thread.
    pub async fn create_discussion(
        &self,
        repository_id: &str,
        category_id: &str,
        title: &str,
        body: &str,
    ) -> Result<NodeRef, GithubError> {
        let data: CreateDiscussionData = self
            .run(&Operation::create_discussion(
                repository_id,
                category_id,
                title,
                body,
            ))
            .await?;
        let discussion = data.create_discussion.discussion.ok_or_else(|| {
            GithubError::MalformedResponse("createDiscussion returned no discussion".to_string())
        })?;
        info!(discussion.id = %discussion.id, url = %discussion.url, "Created discussion");
        Ok(discussion)
    }

    /// Adds a comment and, when `mark_as_answer` is set, flags it as the accepted answer in a
    /// second call. The two calls are not atomic: if marking fails the comment stays created and
    /// the marking error is returned.
    pub async fn create_comment(
        &self,
        discussion_id: &str,
        body: &str,
        mark_as_answer: bool,
    ) -> Result<NodeRef, GithubError> {
        let data: AddDiscussionCommentData = self
            .run(&Operation::create_comment(discussion_id, body))
            .await?;
        let comment = data.add_discussion_comment.comment.ok_or_else(|| {
            GithubError::MalformedResponse("addDiscussionComment returned no comment".to_string())
        })?;
        info!(
            comment.id = %comment.id,
            discussion.id = %discussion_id,
            "Created comment"
        );

        if mark_as_answer {
            self.mark_comment_as_answer(&comment.id).await?;
        }
        Ok(comment)
    }

    /// Returns the id of the discussion the comment now answers.
    pub async fn mark_comment_as_answer(&self, comment_id: &str) -> Result<String, GithubError> {
        let data: MarkCommentAsAnswerData =
            self.run(&Operation::mark_as_answer(comment_id)).await?;
        let discussion = data
            .mark_discussion_comment_as_answer
            .discussion
            .ok_or_else(|| {
                GithubError::MalformedResponse(
                    "markDiscussionCommentAsAnswer returned no discussion".to_string(),
                )
            })?;
        info!(
            comment.id = %comment_id,
            discussion.id = %discussion.id,
            "Marked comment as answer"
        );
        Ok(discussion.id)
    }

    async fn run<D: DeserializeOwned>(&self, operation: &Operation) -> Result<D, GithubError> {
        let data = self.executor.execute(operation).await?;
        Ok(serde_json::from_value(data)?)
    }
}

fn missing_repository(owner: &str, name: &str) -> GithubError {
    GithubError::MalformedResponse(format!("repository {owner}/{name} not visible to token"))
}
