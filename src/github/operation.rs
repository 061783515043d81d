use serde_json::{Value, json};
use std::fmt;

/// What a GraphQL call does; used for logging and for picking the response payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CreateDiscussion,
    CreateComment,
    MarkAsAnswer,
    ReadCategories,
    ReadRepositoryId,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::CreateDiscussion => "create-discussion",
            OperationKind::CreateComment => "create-comment",
            OperationKind::MarkAsAnswer => "mark-as-answer",
            OperationKind::ReadCategories => "read-categories",
            OperationKind::ReadRepositoryId => "read-repository-id",
        };
        f.write_str(name)
    }
}

const CREATE_DISCUSSION: &str = r"
mutation CreateDiscussion($input: CreateDiscussionInput!) {
  createDiscussion(input: $input) {
    discussion {
      id
      url
    }
  }
}";

const ADD_DISCUSSION_COMMENT: &str = r"
mutation AddDiscussionComment($input: AddDiscussionCommentInput!) {
  addDiscussionComment(input: $input) {
    comment {
      id
      url
    }
  }
}";

const MARK_COMMENT_AS_ANSWER: &str = r"
mutation MarkDiscussionCommentAsAnswer($input: MarkDiscussionCommentAsAnswerInput!) {
  markDiscussionCommentAsAnswer(input: $input) {
    discussion {
      id
    }
  }
}";

const GET_DISCUSSION_CATEGORIES: &str = r"
query GetDiscussionCategories($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    discussionCategories(first: 100) {
      nodes {
        id
        name
        description
      }
    }
  }
}";

const GET_REPOSITORY_ID: &str = r"
query GetRepositoryId($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
  }
}";

/// One GraphQL call: document, variable bindings and kind. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    document: &'static str,
    variables: Value,
}

impl Operation {
    pub fn create_discussion(
        repository_id: &str,
        category_id: &str,
        title: &str,
        body: &str,
    ) -> Self {
        Self {
            kind: OperationKind::CreateDiscussion,
            document: CREATE_DISCUSSION,
            variables: json!({
                "input": {
                    "repositoryId": repository_id,
                    "categoryId": category_id,
                    "title": title,
                    "body": body,
                }
            }),
        }
    }

    pub fn create_comment(discussion_id: &str, body: &str) -> Self {
        Self {
            kind: OperationKind::CreateComment,
            document: ADD_DISCUSSION_COMMENT,
            variables: json!({
                "input": {
                    "discussionId": discussion_id,
                    "body": body,
                }
            }),
        }
    }

    pub fn mark_as_answer(comment_id: &str) -> Self {
        Self {
            kind: OperationKind::MarkAsAnswer,
            document: MARK_COMMENT_AS_ANSWER,
            variables: json!({ "input": { "id": comment_id } }),
        }
    }

    pub fn read_categories(owner: &str, name: &str) -> Self {
        Self {
            kind: OperationKind::ReadCategories,
            document: GET_DISCUSSION_CATEGORIES,
            variables: json!({ "owner": owner, "name": name }),
        }
    }

    pub fn read_repository_id(owner: &str, name: &str) -> Self {
        Self {
            kind: OperationKind::ReadRepositoryId,
            document: GET_REPOSITORY_ID,
            variables: json!({ "owner": owner, "name": name }),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn document(&self) -> &'static str {
        self.document
    }

    pub fn variables(&self) -> &Value {
        &self.variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_discussion_binds_input_object() {
        let op = Operation::create_discussion("R_1", "DIC_1", "T", "B");

        assert_eq!(op.kind(), OperationKind::CreateDiscussion);
        assert!(op.document().contains("createDiscussion(input: $input)"));
        assert_eq!(
            op.variables(),
            &json!({"input": {"repositoryId": "R_1", "categoryId": "DIC_1", "title": "T", "body": "B"}})
        );
    }

    #[test]
    fn reads_bind_owner_and_name() {
        let op = Operation::read_categories("octocat", "hello");

        assert_eq!(op.variables(), &json!({"owner": "octocat", "name": "hello"}));
        assert_eq!(op.kind().to_string(), "read-categories");
    }

    #[test]
    fn mark_as_answer_targets_comment_id() {
        let op = Operation::mark_as_answer("DC_9");
        assert_eq!(op.variables(), &json!({"input": {"id": "DC_9"}}));
    }
}
