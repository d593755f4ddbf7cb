//! Like repository.

use std::sync::Arc;

use crate::entities::{Comment, Like, comment, like};
use persona_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    SqlErr, TransactionTrait, sea_query::Expr,
};

/// Like repository for database operations.
///
/// Inserts and deletes pair the relation change with the comment's
/// `like_count` update in a single transaction, so the denormalized counter
/// cannot drift from the like set.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by comment and user.
    pub async fn find_by_comment_and_user(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::CommentId.eq(comment_id))
            .filter(like::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a comment.
    pub async fn has_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_comment_and_user(comment_id, user_id)
            .await?
            .is_some())
    }

    /// Insert a like and increment the comment's like counter, as one
    /// transaction.
    ///
    /// The unique index on (comment_id, user_id) is the duplicate check:
    /// a violation rolls back and maps to `Conflict`, so two concurrent
    /// likes from the same user can never double-insert or double-count.
    pub async fn create_with_count(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = match model.insert(&txn).await {
            Ok(created) => created,
            Err(e) => {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Err(match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        AppError::Conflict("You have already liked this comment".to_string())
                    }
                    _ => AppError::Database(e.to_string()),
                });
            }
        };

        Comment::update_many()
            .col_expr(
                comment::Column::LikeCount,
                Expr::col(comment::Column::LikeCount).add(1),
            )
            .filter(comment::Column::Id.eq(created.comment_id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Delete a like and decrement the comment's like counter, as one
    /// transaction.
    ///
    /// Returns `Conflict` when no like exists for the pair; the counter is
    /// only touched when a row was actually deleted, and the decrement is
    /// floored at zero in SQL.
    pub async fn delete_with_count(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = Like::delete_many()
            .filter(like::Column::CommentId.eq(comment_id))
            .filter(like::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::Conflict(
                "You have not liked this comment yet".to_string(),
            ));
        }

        Comment::update_many()
            .col_expr(
                comment::Column::LikeCount,
                Expr::cust("GREATEST(like_count - 1, 0)"),
            )
            .filter(comment::Column::Id.eq(comment_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Count likes on a comment.
    pub async fn count_by_comment(&self, comment_id: &str) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::CommentId.eq(comment_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_like(id: &str, comment_id: &str, user_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            comment_id: comment_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_comment_and_user_found() {
        let like = create_test_like("l1", "c1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.find_by_comment_and_user("c1", "u1").await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.has_liked("c1", "u1").await.unwrap();

        assert!(!result);
    }

    #[tokio::test]
    async fn test_create_with_count_inserts_and_increments() {
        let like = create_test_like("l1", "c1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let model = like::ActiveModel {
            id: Set("l1".to_string()),
            comment_id: Set("c1".to_string()),
            user_id: Set("u1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let created = repo.create_with_count(model).await.unwrap();
        assert_eq!(created.comment_id, "c1");
        assert_eq!(created.user_id, "u1");
    }

    #[tokio::test]
    async fn test_delete_with_count_missing_like_is_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.delete_with_count("c1", "u1").await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("not liked")),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_count_by_comment() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(4))
                }]])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let count = repo.count_by_comment("c1").await.unwrap();

        assert_eq!(count, 4);
    }
}
