//! Comment endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use persona_common::{AppError, AppResult};
use persona_core::{CommentListPage, CreateCommentInput, ListCommentsQuery, UpdateCommentInput};
use persona_db::entities::comment::{self, PersonalityType};
use persona_db::repositories::CommentSort;
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState};

/// Comment response.
#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub personality_types: serde_json::Value,
    pub like_count: i32,
    pub created_at: String,
    pub last_modified_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            title: comment.title,
            description: comment.description,
            personality_types: comment.personality_types,
            like_count: comment.like_count,
            created_at: comment.created_at.to_rfc3339(),
            last_modified_at: comment.last_modified_at.to_rfc3339(),
        }
    }
}

/// List comments query parameters.
#[derive(Debug, Deserialize)]
pub struct ListCommentsParams {
    pub page: Option<u64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u64>,
    /// One of "asc", "desc", "likes".
    pub sort: Option<String>,
    /// Comma-separated personality systems, e.g. "MBTI,Zodiac".
    pub personality_types: Option<String>,
}

/// Comment listing response.
#[derive(Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_comments: u64,
}

impl From<CommentListPage> for CommentListResponse {
    fn from(page: CommentListPage) -> Self {
        Self {
            comments: page.comments.into_iter().map(Into::into).collect(),
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_comments: page.total_comments,
        }
    }
}

fn parse_personality_types(raw: Option<&str>) -> AppResult<Vec<PersonalityType>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            serde_json::from_value(serde_json::Value::String(part.to_string()))
                .map_err(|_| AppError::BadRequest(format!("Invalid personality type: {part}")))
        })
        .collect()
}

/// Unknown sort values fall back to newest-first.
fn parse_sort(raw: Option<&str>) -> CommentSort {
    match raw {
        Some("asc") => CommentSort::CreatedAsc,
        Some("likes") => CommentSort::MostLiked,
        _ => CommentSort::CreatedDesc,
    }
}

/// Create a comment.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.create(req).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Get a comment.
async fn show(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.get(&comment_id).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Update a comment's title and description.
async fn update(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(req): Json<UpdateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.update(&comment_id, req).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Delete a comment.
async fn destroy(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.comment_service.delete(&comment_id).await?;
    Ok(ApiResponse::ok(()))
}

/// List comments (filtered, sorted, paginated).
async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListCommentsParams>,
) -> AppResult<ApiResponse<CommentListResponse>> {
    let query = ListCommentsQuery {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(10),
        sort: parse_sort(params.sort.as_deref()),
        personality_types: parse_personality_types(params.personality_types.as_deref())?,
    };

    let page = state.comment_service.list(query).await?;
    Ok(ApiResponse::ok(page.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{comment_id}", get(show).put(update).delete(destroy))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_personality_types() {
        assert_eq!(parse_personality_types(None).unwrap(), vec![]);
        assert_eq!(
            parse_personality_types(Some("MBTI,Zodiac")).unwrap(),
            vec![PersonalityType::Mbti, PersonalityType::Zodiac]
        );
        assert_eq!(
            parse_personality_types(Some(" Enneagram ")).unwrap(),
            vec![PersonalityType::Enneagram]
        );
        assert!(parse_personality_types(Some("Astrology")).is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort(Some("asc")), CommentSort::CreatedAsc);
        assert_eq!(parse_sort(Some("likes")), CommentSort::MostLiked);
        assert_eq!(parse_sort(Some("desc")), CommentSort::CreatedDesc);
        assert_eq!(parse_sort(Some("garbage")), CommentSort::CreatedDesc);
        assert_eq!(parse_sort(None), CommentSort::CreatedDesc);
    }
}
