mod discussions;
mod envelope;

pub use discussions::{
    AddDiscussionCommentData, CreateDiscussionData, DiscussionCategoriesData, DiscussionCategory,
    MarkCommentAsAnswerData, NodeRef, RepositoryIdData,
};
pub use envelope::{GraphqlErrorObject, GraphqlRequest, GraphqlResponse};
