//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use persona_common::AppResult;
use persona_core::CreateUserInput;
use serde::Serialize;

use crate::{response::ApiResponse, state::AppState};

/// User response.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mbti: String,
    pub enneagram: String,
    pub variant: String,
    pub tritype: i32,
    pub socionics: String,
    pub sloan: String,
    pub psyche: String,
    pub image: String,
    pub created_at: String,
}

impl From<persona_db::entities::user::Model> for UserResponse {
    fn from(user: persona_db::entities::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            description: user.description,
            mbti: user.mbti,
            enneagram: user.enneagram,
            variant: user.variant,
            tritype: user.tritype,
            socionics: user.socionics,
            sloan: user.sloan,
            psyche: user.psyche,
            image: user.image,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Create a user profile.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.create(req).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Get a user profile.
async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get(&user_id).await?;
    Ok(ApiResponse::ok(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{user_id}", get(show))
}
