//! Reaction service: likes and personality-type votes on comments.

use persona_common::{AppError, AppResult, IdGenerator};
use persona_db::{
    entities::{comment::PersonalityType, like, vote},
    repositories::{CommentRepository, LikeRepository, UserRepository, VoteRepository},
};
use sea_orm::Set;

use crate::vocabulary;

/// Votes a user may cast on a single comment, across all systems.
const MAX_VOTES_PER_COMMENT: u64 = 3;

/// Reaction service for business logic.
#[derive(Clone)]
pub struct ReactionService {
    like_repo: LikeRepository,
    vote_repo: VoteRepository,
    comment_repo: CommentRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ReactionService {
    /// Create a new reaction service.
    #[must_use]
    pub const fn new(
        like_repo: LikeRepository,
        vote_repo: VoteRepository,
        comment_repo: CommentRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            like_repo,
            vote_repo,
            comment_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Like a comment.
    ///
    /// The like insert and the comment's counter increment commit together;
    /// a duplicate like is a `Conflict` and changes nothing.
    pub async fn like(&self, comment_id: &str, user_id: &str) -> AppResult<like::Model> {
        self.user_repo.get_by_id(user_id).await?;
        self.comment_repo.get_by_id(comment_id).await?;

        let model = like::ActiveModel {
            id: Set(self.id_gen.generate()),
            comment_id: Set(comment_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = self.like_repo.create_with_count(model).await?;
        tracing::debug!(comment_id = %comment_id, user_id = %user_id, "Comment liked");
        Ok(created)
    }

    /// Remove a user's like from a comment.
    ///
    /// Unliking a comment the user never liked is a `Conflict` and changes
    /// nothing.
    pub async fn unlike(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
        self.user_repo.get_by_id(user_id).await?;
        self.comment_repo.get_by_id(comment_id).await?;

        self.like_repo.delete_with_count(comment_id, user_id).await?;
        tracing::debug!(comment_id = %comment_id, user_id = %user_id, "Comment unliked");
        Ok(())
    }

    /// Get the number of likes on a comment.
    ///
    /// Recomputed from the like set; equal to the denormalized counter at
    /// all times, since every mutation updates both in one transaction.
    pub async fn like_count(&self, comment_id: &str) -> AppResult<u64> {
        self.comment_repo.get_by_id(comment_id).await?;
        self.like_repo.count_by_comment(comment_id).await
    }

    /// Cast a personality-type vote on a comment.
    ///
    /// Validation order: user exists, comment exists, the system is one the
    /// comment declared, the tag belongs to the system's vocabulary. The
    /// duplicate and vote-cap checks run inside the insert transaction.
    pub async fn vote(
        &self,
        comment_id: &str,
        user_id: &str,
        personality_type: PersonalityType,
        personality_type_tag: &str,
    ) -> AppResult<vote::Model> {
        self.user_repo.get_by_id(user_id).await?;
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        let declared: Vec<PersonalityType> =
            serde_json::from_value(comment.personality_types.clone()).map_err(|e| {
                AppError::Internal(format!("Invalid declared personality types: {e}"))
            })?;

        if !declared.contains(&personality_type) {
            return Err(AppError::BadRequest(
                "Personality type not valid for this comment".to_string(),
            ));
        }

        if !vocabulary::is_valid_tag(personality_type, personality_type_tag) {
            return Err(AppError::BadRequest(format!(
                "{personality_type_tag} is not a valid {} tag",
                personality_type.as_str()
            )));
        }

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            comment_id: Set(comment_id.to_string()),
            user_id: Set(user_id.to_string()),
            personality_type: Set(personality_type),
            personality_type_tag: Set(personality_type_tag.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = self
            .vote_repo
            .create_checked(model, MAX_VOTES_PER_COMMENT)
            .await?;
        tracing::debug!(
            comment_id = %comment_id,
            user_id = %user_id,
            personality_type = personality_type.as_str(),
            tag = %created.personality_type_tag,
            "Vote cast"
        );
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use persona_db::entities::{comment, user};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Alice".to_string(),
            description: "A test profile that is long enough".to_string(),
            mbti: "INFJ".to_string(),
            enneagram: "9w8".to_string(),
            variant: "sp/so".to_string(),
            tritype: 725,
            socionics: "SEE".to_string(),
            sloan: "RCOEN".to_string(),
            psyche: "FEVL".to_string(),
            image: "https://example.com/avatar.png".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_comment(id: &str, declared: serde_json::Value) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            user_id: "author1".to_string(),
            title: "Definitely an INFP".to_string(),
            description: "The interview answers say it all".to_string(),
            personality_types: declared,
            like_count: 0,
            created_at: Utc::now().into(),
            last_modified_at: Utc::now().into(),
        }
    }

    fn create_test_like(id: &str, comment_id: &str, user_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            comment_id: comment_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_vote(
        id: &str,
        comment_id: &str,
        user_id: &str,
        personality_type: PersonalityType,
        tag: &str,
    ) -> vote::Model {
        vote::Model {
            id: id.to_string(),
            comment_id: comment_id.to_string(),
            user_id: user_id.to_string(),
            personality_type,
            personality_type_tag: tag.to_string(),
            created_at: Utc::now().into(),
        }
    }

    struct MockRepos {
        like_db: MockDatabase,
        vote_db: MockDatabase,
        comment_db: MockDatabase,
        user_db: MockDatabase,
    }

    impl MockRepos {
        fn new() -> Self {
            Self {
                like_db: MockDatabase::new(DatabaseBackend::Postgres),
                vote_db: MockDatabase::new(DatabaseBackend::Postgres),
                comment_db: MockDatabase::new(DatabaseBackend::Postgres),
                user_db: MockDatabase::new(DatabaseBackend::Postgres),
            }
        }

        fn into_service(self) -> ReactionService {
            ReactionService::new(
                LikeRepository::new(Arc::new(self.like_db.into_connection())),
                VoteRepository::new(Arc::new(self.vote_db.into_connection())),
                CommentRepository::new(Arc::new(self.comment_db.into_connection())),
                UserRepository::new(Arc::new(self.user_db.into_connection())),
            )
        }
    }

    #[tokio::test]
    async fn test_like_user_not_found() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks
            .user_db
            .append_query_results([Vec::<user::Model>::new()]);

        let service = mocks.into_service();
        let result = service.like("c1", "u1").await;

        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "u1"),
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_like_comment_not_found() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([Vec::<comment::Model>::new()]);

        let service = mocks.into_service();
        let result = service.like("c42", "u1").await;

        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "c42"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_like_success() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI"]))]]);
        mocks.like_db = mocks
            .like_db
            .append_query_results([[create_test_like("l1", "c1", "u1")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);

        let service = mocks.into_service();
        let created = service.like("c1", "u1").await.unwrap();

        assert_eq!(created.comment_id, "c1");
        assert_eq!(created.user_id, "u1");
    }

    #[tokio::test]
    async fn test_unlike_without_like_is_conflict() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI"]))]]);
        mocks.like_db = mocks.like_db.append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }]);

        let service = mocks.into_service();
        let result = service.unlike("c1", "u1").await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("not liked")),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_like_count_comment_not_found() {
        let mut mocks = MockRepos::new();
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([Vec::<comment::Model>::new()]);

        let service = mocks.into_service();
        let result = service.like_count("c42").await;

        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "c42"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_like_count_recomputes_from_likes() {
        let mut mocks = MockRepos::new();
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI"]))]]);
        mocks.like_db = mocks.like_db.append_query_results([[maplit::btreemap! {
            "num_items" => sea_orm::Value::BigInt(Some(5))
        }]]);

        let service = mocks.into_service();
        let count = service.like_count("c1").await.unwrap();

        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn test_vote_user_not_found() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks
            .user_db
            .append_query_results([Vec::<user::Model>::new()]);

        let service = mocks.into_service();
        let result = service
            .vote("c1", "u1", PersonalityType::Mbti, "INFP")
            .await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_vote_undeclared_type_is_rejected_before_tag_check() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        // Comment declares MBTI and Zodiac only
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]]);

        let service = mocks.into_service();
        // "4w3" is a valid Enneagram tag, but the system is not declared
        let result = service
            .vote("c1", "u1", PersonalityType::Enneagram, "4w3")
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("not valid for this comment"));
            }
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_vote_invalid_tag_for_declared_type() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]]);

        let service = mocks.into_service();
        // "Leo" is a Zodiac tag, not an MBTI one
        let result = service.vote("c1", "u1", PersonalityType::Mbti, "Leo").await;

        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("not a valid MBTI tag")),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_vote_success() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]]);
        mocks.vote_db = mocks
            .vote_db
            // Comment row lock inside the insert transaction
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]])
            // No existing vote for the triple
            .append_query_results([Vec::<vote::Model>::new()])
            // One vote cast so far, under the cap
            .append_query_results([[maplit::btreemap! {
                "num_items" => sea_orm::Value::BigInt(Some(1))
            }]])
            // The inserted row
            .append_query_results([[create_test_vote(
                "v1",
                "c1",
                "u1",
                PersonalityType::Mbti,
                "INFP",
            )]]);

        let service = mocks.into_service();
        let created = service
            .vote("c1", "u1", PersonalityType::Mbti, "INFP")
            .await
            .unwrap();

        assert_eq!(created.personality_type, PersonalityType::Mbti);
        assert_eq!(created.personality_type_tag, "INFP");
    }

    #[tokio::test]
    async fn test_vote_duplicate_type_is_conflict() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]]);
        mocks.vote_db = mocks
            .vote_db
            .append_query_results([[create_test_comment("c1", json!(["MBTI", "Zodiac"]))]])
            // A vote under the same system already exists, tag irrelevant
            .append_query_results([[create_test_vote(
                "v0",
                "c1",
                "u1",
                PersonalityType::Mbti,
                "INFP",
            )]]);

        let service = mocks.into_service();
        let result = service.vote("c1", "u1", PersonalityType::Mbti, "ENFP").await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("already voted")),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_vote_limit_reached() {
        let mut mocks = MockRepos::new();
        mocks.user_db = mocks.user_db.append_query_results([[create_test_user("u1")]]);
        mocks.comment_db = mocks
            .comment_db
            .append_query_results([[create_test_comment(
                "c1",
                json!(["MBTI", "Enneagram", "Zodiac"]),
            )]]);
        mocks.vote_db = mocks
            .vote_db
            .append_query_results([[create_test_comment(
                "c1",
                json!(["MBTI", "Enneagram", "Zodiac"]),
            )]])
            .append_query_results([Vec::<vote::Model>::new()])
            .append_query_results([[maplit::btreemap! {
                "num_items" => sea_orm::Value::BigInt(Some(3))
            }]]);

        let service = mocks.into_service();
        let result = service
            .vote("c1", "u1", PersonalityType::Zodiac, "Leo")
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("limit")),
            _ => panic!("Expected Conflict error"),
        }
    }
}
