//! Comment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Personality classification systems.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PersonalityType {
    #[sea_orm(string_value = "MBTI")]
    #[serde(rename = "MBTI")]
    Mbti,
    #[sea_orm(string_value = "Enneagram")]
    Enneagram,
    #[sea_orm(string_value = "Zodiac")]
    Zodiac,
}

impl PersonalityType {
    /// The wire name of this system.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mbti => "MBTI",
            Self::Enneagram => "Enneagram",
            Self::Zodiac => "Zodiac",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Comment title
    pub title: String,

    /// Comment body
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Personality systems this comment proposes types under
    /// (JSON array of `PersonalityType` wire names)
    #[sea_orm(column_type = "JsonBinary")]
    pub personality_types: Json,

    /// Like count (denormalized)
    #[sea_orm(default_value = 0)]
    pub like_count: i32,

    pub created_at: DateTimeWithTimeZone,

    /// Bumped on every title/description edit
    pub last_modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
