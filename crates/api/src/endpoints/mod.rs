//! API endpoints.

mod comments;
mod reactions;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/comments", comments::router().merge(reactions::router()))
}
