//! Comment service.

use chrono::Utc;
use persona_common::{AppError, AppResult, IdGenerator};
use persona_db::{
    entities::comment::{self, PersonalityType},
    repositories::{CommentRepository, CommentSort, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

/// Page size ceiling for listings.
const MAX_PAGE_SIZE: u64 = 100;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title is mandatory and must be at most 100 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description is mandatory and must be at most 1000 characters"
    ))]
    pub description: String,

    /// Personality systems this comment proposes types under
    /// (wire names, e.g. "MBTI").
    pub personality_types: Vec<String>,

    /// The authoring user.
    pub user_id: String,
}

/// Input for updating a comment's text.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title is mandatory and must be at most 100 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description is mandatory and must be at most 1000 characters"
    ))]
    pub description: String,
}

/// Query for listing comments.
#[derive(Debug, Clone)]
pub struct ListCommentsQuery {
    /// 1-based page number.
    pub page: u64,
    /// Comments per page, capped at [`MAX_PAGE_SIZE`].
    pub page_size: u64,
    /// Sort order.
    pub sort: CommentSort,
    /// OR-filter on declared systems; empty matches all.
    pub personality_types: Vec<PersonalityType>,
}

impl Default for ListCommentsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            sort: CommentSort::default(),
            personality_types: Vec::new(),
        }
    }
}

/// A page of comments.
#[derive(Debug, Serialize)]
pub struct CommentListPage {
    pub comments: Vec<comment::Model>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_comments: u64,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, user_repo: UserRepository) -> Self {
        Self {
            comment_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new comment.
    pub async fn create(&self, input: CreateCommentInput) -> AppResult<comment::Model> {
        input.validate()?;

        if input.personality_types.is_empty() {
            return Err(AppError::BadRequest(
                "At least one personality type is required".to_string(),
            ));
        }

        // Set semantics: duplicates collapse, declaration order kept
        let mut declared: Vec<PersonalityType> = Vec::new();
        for raw in &input.personality_types {
            let personality_type: PersonalityType =
                serde_json::from_value(serde_json::Value::String(raw.clone()))
                    .map_err(|_| AppError::BadRequest("Invalid personality types".to_string()))?;
            if !declared.contains(&personality_type) {
                declared.push(personality_type);
            }
        }

        self.user_repo.get_by_id(&input.user_id).await?;

        let now = Utc::now();
        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            personality_types: Set(json!(declared)),
            like_count: Set(0),
            created_at: Set(now.into()),
            last_modified_at: Set(now.into()),
        };

        let comment = self.comment_repo.create(model).await?;
        tracing::debug!(comment_id = %comment.id, user_id = %comment.user_id, "Comment created");
        Ok(comment)
    }

    /// Get a comment by ID.
    pub async fn get(&self, comment_id: &str) -> AppResult<comment::Model> {
        self.comment_repo.get_by_id(comment_id).await
    }

    /// Update a comment's title and description.
    ///
    /// Declared systems, the author, the creation time, and the like
    /// counter do not change through this path.
    pub async fn update(
        &self,
        comment_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<comment::Model> {
        let existing = self.comment_repo.get_by_id(comment_id).await?;
        input.validate()?;

        let mut active: comment::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.last_modified_at = Set(Utc::now().into());

        let updated = self.comment_repo.update(active).await?;
        tracing::debug!(comment_id = %updated.id, "Comment updated");
        Ok(updated)
    }

    /// Delete a comment.
    ///
    /// Dependent likes and votes are removed by the cascade foreign keys.
    pub async fn delete(&self, comment_id: &str) -> AppResult<()> {
        self.comment_repo.get_by_id(comment_id).await?;
        self.comment_repo.delete(comment_id).await?;
        tracing::debug!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    /// List comments (filtered, sorted, paginated).
    pub async fn list(&self, query: ListCommentsQuery) -> AppResult<CommentListPage> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let comments = self
            .comment_repo
            .list(&query.personality_types, query.sort, page_size, offset)
            .await?;
        let total_comments = self.comment_repo.count(&query.personality_types).await?;
        let total_pages = total_comments.div_ceil(page_size);

        Ok(CommentListPage {
            comments,
            page,
            page_size,
            total_pages,
            total_comments,
        })
    }
}
