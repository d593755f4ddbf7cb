//! User service.

use chrono::Utc;
use persona_common::{AppResult, IdGenerator};
use persona_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Avatar used when a profile is created without an image.
const DEFAULT_AVATAR_URL: &str =
    "https://www.gravatar.com/avatar/205e460b479e2e5b48aec07710c08d50?s=200";

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a user profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Name length should be between 3 and 50 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Description length should be between 10 and 500 characters"
    ))]
    pub description: String,

    pub mbti: String,
    pub enneagram: String,
    pub variant: String,
    pub tritype: i32,
    pub socionics: String,
    pub sloan: String,
    pub psyche: String,

    /// Avatar URL; falls back to the default avatar when absent.
    #[serde(default)]
    pub image: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new user profile.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            description: Set(input.description),
            mbti: Set(input.mbti),
            enneagram: Set(input.enneagram),
            variant: Set(input.variant),
            tritype: Set(input.tritype),
            socionics: Set(input.socionics),
            sloan: Set(input.sloan),
            psyche: Set(input.psyche),
            image: Set(input.image.unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string())),
            created_at: Set(Utc::now().into()),
        };

        let user = self.user_repo.create(model).await?;
        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use persona_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, image: &str) -> user::Model {
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
            image: image.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_input(name: &str, description: &str) -> CreateUserInput {
        CreateUserInput {
            name: name.to_string(),
            description: description.to_string(),
            mbti: "INFJ".to_string(),
            enneagram: "9w8".to_string(),
            variant: "sp/so".to_string(),
            tritype: 725,
            socionics: "SEE".to_string(),
            sloan: "RCOEN".to_string(),
            psyche: "FEVL".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_name_too_short() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));

        let result = service
            .create(create_input("Al", "A description that is long enough"))
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("between 3 and 50")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_create_description_too_short() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));

        let result = service.create(create_input("Alice", "too short")).await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("between 10 and 500")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_avatar() {
        let created = create_test_user("u1", DEFAULT_AVATAR_URL);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let user = service
            .create(create_input("Alice", "A description that is long enough"))
            .await
            .unwrap();

        assert_eq!(user.image, DEFAULT_AVATAR_URL);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.get("nonexistent").await;
        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }
}
