//! Vote repository.

use std::sync::Arc;

use crate::entities::{Comment, Vote, comment, vote};
use persona_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, SqlErr, TransactionTrait,
};

/// Vote repository for database operations.
///
/// Vote casting runs as one transaction: the duplicate check, the per-pair
/// cap check, and the insert all see a stable vote set, serialized per
/// comment through a row lock on the comment itself.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a vote by comment, user, and personality system.
    pub async fn find_by_comment_user_and_type(
        &self,
        comment_id: &str,
        user_id: &str,
        personality_type: comment::PersonalityType,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::CommentId.eq(comment_id))
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::PersonalityType.eq(personality_type))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count votes a user has cast on a comment, across all systems.
    pub async fn count_by_comment_and_user(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> AppResult<u64> {
        Vote::find()
            .filter(vote::Column::CommentId.eq(comment_id))
            .filter(vote::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a vote, enforcing the one-per-system rule and the per-pair
    /// cap, as one transaction.
    ///
    /// The comment row is locked for the duration, so two concurrent casts
    /// on the same comment cannot both pass the cap check. The unique index
    /// on (comment_id, user_id, personality_type) backs the duplicate check
    /// against writers that bypass the lock.
    pub async fn create_checked(
        &self,
        model: vote::ActiveModel,
        cap: u64,
    ) -> AppResult<vote::Model> {
        let (comment_id, user_id, personality_type) =
            match (&model.comment_id, &model.user_id, &model.personality_type) {
                (
                    ActiveValue::Set(comment_id),
                    ActiveValue::Set(user_id),
                    ActiveValue::Set(personality_type),
                ) => (comment_id.clone(), user_id.clone(), *personality_type),
                _ => {
                    return Err(AppError::Internal(
                        "vote insert requires comment_id, user_id, and personality_type"
                            .to_string(),
                    ));
                }
            };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Lock the comment row: serializes voters on this comment.
        Comment::find_by_id(&comment_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::CommentNotFound(comment_id.clone()))?;

        let existing = Vote::find()
            .filter(vote::Column::CommentId.eq(comment_id.as_str()))
            .filter(vote::Column::UserId.eq(user_id.as_str()))
            .filter(vote::Column::PersonalityType.eq(personality_type))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_some() {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::Conflict(
                "You have already voted for this personality type on this comment".to_string(),
            ));
        }

        let cast = Vote::find()
            .filter(vote::Column::CommentId.eq(comment_id.as_str()))
            .filter(vote::Column::UserId.eq(user_id.as_str()))
            .count(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if cast >= cap {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::Conflict(
                "Vote limit reached for this comment".to_string(),
            ));
        }

        let created = match model.insert(&txn).await {
            Ok(created) => created,
            Err(e) => {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Err(match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(
                        "You have already voted for this personality type on this comment"
                            .to_string(),
                    ),
                    _ => AppError::Database(e.to_string()),
                });
            }
        };

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }
}
