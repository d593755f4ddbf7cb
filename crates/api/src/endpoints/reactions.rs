//! Reaction endpoints: likes and votes on comments.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use persona_common::{AppError, AppResult};
use persona_db::entities::comment::PersonalityType;
use persona_db::entities::{like, vote};
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState};

/// Like / unlike request, carrying the acting user.
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub user_id: String,
}

/// Like response.
#[derive(Serialize)]
pub struct LikeResponse {
    pub id: String,
    pub comment_id: String,
    pub user_id: String,
    pub created_at: String,
}

impl From<like::Model> for LikeResponse {
    fn from(like: like::Model) -> Self {
        Self {
            id: like.id,
            comment_id: like.comment_id,
            user_id: like.user_id,
            created_at: like.created_at.to_rfc3339(),
        }
    }
}

/// Like count response.
#[derive(Serialize)]
pub struct LikeCountResponse {
    pub count: u64,
}

/// Vote request.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user_id: String,
    /// One of "MBTI", "Enneagram", "Zodiac".
    pub personality_type: String,
    pub personality_type_tag: String,
}

/// Vote response.
#[derive(Serialize)]
pub struct VoteResponse {
    pub id: String,
    pub comment_id: String,
    pub user_id: String,
    pub personality_type: PersonalityType,
    pub personality_type_tag: String,
    pub created_at: String,
}

impl From<vote::Model> for VoteResponse {
    fn from(vote: vote::Model) -> Self {
        Self {
            id: vote.id,
            comment_id: vote.comment_id,
            user_id: vote.user_id,
            personality_type: vote.personality_type,
            personality_type_tag: vote.personality_type_tag,
            created_at: vote.created_at.to_rfc3339(),
        }
    }
}

/// Like a comment.
async fn like(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<LikeResponse>> {
    let like = state
        .reaction_service
        .like(&comment_id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(like.into()))
}

/// Remove a like from a comment.
async fn unlike(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .reaction_service
        .unlike(&comment_id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Get the number of likes on a comment.
async fn like_count(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<ApiResponse<LikeCountResponse>> {
    let count = state.reaction_service.like_count(&comment_id).await?;
    Ok(ApiResponse::ok(LikeCountResponse { count }))
}

/// Cast a personality-type vote on a comment.
async fn vote(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let personality_type: PersonalityType =
        serde_json::from_value(serde_json::Value::String(req.personality_type.clone()))
            .map_err(|_| AppError::BadRequest("Invalid personality type".to_string()))?;

    let vote = state
        .reaction_service
        .vote(
            &comment_id,
            &req.user_id,
            personality_type,
            &req.personality_type_tag,
        )
        .await?;
    Ok(ApiResponse::ok(vote.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{comment_id}/likes", post(like).delete(unlike))
        .route("/{comment_id}/likes/count", get(like_count))
        .route("/{comment_id}/vote", post(vote))
}
