pub mod export;
pub mod graphql;

pub use export::{Account, Badge, Comment, Image, Post, PostType, Tag, User};
pub use graphql::{
    AddDiscussionCommentData, CreateDiscussionData, DiscussionCategoriesData, DiscussionCategory,
    GraphqlErrorObject, GraphqlRequest, GraphqlResponse, MarkCommentAsAnswerData, NodeRef,
    RepositoryIdData,
};
