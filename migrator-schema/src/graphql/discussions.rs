//! Response payloads of the discussion operations, shaped after the GraphQL documents.

use serde::{Deserialize, Serialize};

/// `{ id url }` selection shared by created discussions and comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeRef {
    pub id: String,

    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionData {
    pub create_discussion: CreateDiscussionPayload,
}

#[derive(Debug, Deserialize)]
pub struct CreateDiscussionPayload {
    pub discussion: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDiscussionCommentData {
    pub add_discussion_comment: AddDiscussionCommentPayload,
}

#[derive(Debug, Deserialize)]
pub struct AddDiscussionCommentPayload {
    pub comment: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkCommentAsAnswerData {
    pub mark_discussion_comment_as_answer: MarkCommentAsAnswerPayload,
}

#[derive(Debug, Deserialize)]
pub struct MarkCommentAsAnswerPayload {
    pub discussion: Option<DiscussionId>,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIdData {
    pub repository: Option<RepositoryId>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionCategoriesData {
    pub repository: Option<RepositoryCategories>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryCategories {
    pub discussion_categories: CategoryConnection,
}

#[derive(Debug, Deserialize)]
pub struct CategoryConnection {
    #[serde(default)]
    pub nodes: Vec<DiscussionCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscussionCategory {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl DiscussionCategoriesData {
    pub fn into_categories(self) -> Option<Vec<DiscussionCategory>> {
        self.repository.map(|repo| repo.discussion_categories.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_flatten_from_connection() {
        let raw = r#"{
            "repository": {
                "discussionCategories": {
                    "nodes": [
                        {"id": "DIC_1", "name": "Q&A", "description": "Ask the community"},
                        {"id": "DIC_2", "name": "General", "description": null}
                    ]
                }
            }
        }"#;
        let data: DiscussionCategoriesData = serde_json::from_str(raw).expect("parse categories");
        let categories = data.into_categories().expect("repository present");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Q&A");
        assert_eq!(categories[1].description, None);
    }

    #[test]
    fn missing_repository_yields_none() {
        let data: DiscussionCategoriesData =
            serde_json::from_str(r#"{"repository": null}"#).expect("parse categories");
        assert!(data.into_categories().is_none());
    }
}
