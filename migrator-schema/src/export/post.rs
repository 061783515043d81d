use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a post in the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Question,
    Answer,
    Article,
    /// Anything else the export may carry (wiki excerpts, collections, ...).
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of `posts.json`.
///
/// `id` and `postType` are required; every other field is optional or defaults to zero.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,

    pub post_type: PostType,

    #[serde(default)]
    pub post_state: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub body_markdown: String,

    /// Rendered HTML body.
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub favorite_count: i64,

    #[serde(default)]
    pub comment_count: i64,

    #[serde(default)]
    pub answer_count: i64,

    #[serde(default)]
    pub answer_score: i64,

    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    pub owner_user_id: i64,

    // Questions only.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<i64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_answer_id: Option<i64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    // Answers only.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl Post {
    /// Markdown source when the export carries it, otherwise the rendered body.
    pub fn source_body(&self) -> &str {
        if self.body_markdown.trim().is_empty() {
            &self.body
        } else {
            &self.body_markdown
        }
    }

    /// Whether this post becomes a top-level discussion.
    pub fn is_discussion_root(&self) -> bool {
        matches!(self.post_type, PostType::Question | PostType::Article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_question_and_ignores_unknown_fields() {
        let raw = r#"{
            "id": 1,
            "postType": "question",
            "creationDate": "2023-04-01T12:30:00Z",
            "title": "T",
            "body": "<p>B</p>",
            "bodyMarkdown": "B",
            "ownerUserId": 7,
            "acceptedAnswerId": 2,
            "lastEditorUserId": 9,
            "isDeleted": false
        }"#;
        let post: Post = serde_json::from_str(raw).expect("parse post");

        assert_eq!(post.id, 1);
        assert_eq!(post.post_type, PostType::Question);
        assert_eq!(post.accepted_answer_id, Some(2));
        assert_eq!(post.owner_user_id, 7);
        assert_eq!(post.source_body(), "B");
        assert!(post.creation_date.is_some());
        assert!(post.is_discussion_root());
    }

    #[test]
    fn falls_back_to_rendered_body_when_markdown_is_empty() {
        let raw = r#"{"id": 2, "postType": "answer", "parentId": 1, "body": "A"}"#;
        let post: Post = serde_json::from_str(raw).expect("parse post");

        assert_eq!(post.source_body(), "A");
        assert_eq!(post.parent_id, Some(1));
        assert_eq!(post.score, 0);
        assert!(!post.is_discussion_root());
    }

    #[test]
    fn unknown_post_type_maps_to_other() {
        let raw = r#"{"id": 3, "postType": "wikiExcerpt"}"#;
        let post: Post = serde_json::from_str(raw).expect("parse post");

        assert_eq!(post.post_type, PostType::Other);
    }

    #[test]
    fn missing_id_is_rejected() {
        let raw = r#"{"postType": "question"}"#;
        assert!(serde_json::from_str::<Post>(raw).is_err());
    }
}
