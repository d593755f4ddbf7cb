//! Business logic services.

#![allow(missing_docs)]

pub mod comment;
pub mod reaction;
pub mod user;

pub use comment::{
    CommentListPage, CommentService, CreateCommentInput, ListCommentsQuery, UpdateCommentInput,
};
pub use reaction::ReactionService;
pub use user::{CreateUserInput, UserService};
