//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use persona_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};

/// Sort order for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    /// Oldest first (by creation time).
    CreatedAsc,
    /// Newest first (by creation time).
    #[default]
    CreatedDesc,
    /// Most liked first.
    MostLiked,
}

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CommentNotFound(id.to_string()))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a comment.
    pub async fn update(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a comment. Dependent likes and votes go with it via the
    /// cascade foreign keys.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Comment::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List comments (filtered, sorted, paginated).
    ///
    /// `filter` has OR semantics: a comment matches when it declares at
    /// least one of the requested systems. An empty filter matches all.
    pub async fn list(
        &self,
        filter: &[comment::PersonalityType],
        sort: CommentSort,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        let mut query = Comment::find();

        if !filter.is_empty() {
            query = query.filter(Self::declared_types_filter(filter));
        }

        query = match sort {
            CommentSort::CreatedAsc => query.order_by_asc(comment::Column::CreatedAt),
            CommentSort::CreatedDesc => query.order_by_desc(comment::Column::CreatedAt),
            CommentSort::MostLiked => query
                .order_by_desc(comment::Column::LikeCount)
                .order_by_desc(comment::Column::CreatedAt),
        };

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count comments matching a filter.
    pub async fn count(&self, filter: &[comment::PersonalityType]) -> AppResult<u64> {
        let mut query = Comment::find();

        if !filter.is_empty() {
            query = query.filter(Self::declared_types_filter(filter));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// JSONB containment check per requested system, OR-chained.
    fn declared_types_filter(filter: &[comment::PersonalityType]) -> Condition {
        let mut cond = Condition::any();
        for personality_type in filter {
            cond = cond.add(Expr::cust_with_values(
                "personality_types @> $1::jsonb",
                [serde_json::json!([personality_type.as_str()]).to_string()],
            ));
        }
        cond
    }
}
