//! Database repositories.

mod comment;
mod like;
mod user;
mod vote;

pub use comment::{CommentRepository, CommentSort};
pub use like::LikeRepository;
pub use user::UserRepository;
pub use vote::VoteRepository;
