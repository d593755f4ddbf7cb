//! Shared application state.

use persona_core::{CommentService, ReactionService, UserService};

/// Application state handed to every endpoint.
#[derive(Clone)]
pub struct AppState {
    /// User profile operations.
    pub user_service: UserService,
    /// Comment lifecycle and listing.
    pub comment_service: CommentService,
    /// Likes and votes.
    pub reaction_service: ReactionService,
}
