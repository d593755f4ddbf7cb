//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Profile description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Self-reported MBTI type (e.g. "INFJ")
    pub mbti: String,

    /// Self-reported Enneagram type (e.g. "9w3")
    pub enneagram: String,

    /// Instinctual variant (e.g. "sp/so")
    pub variant: String,

    /// Tritype number (e.g. 725)
    pub tritype: i32,

    /// Socionics type (e.g. "SEE")
    pub socionics: String,

    /// SLOAN type (e.g. "RCOEN")
    pub sloan: String,

    /// Psyche type (e.g. "FEVL")
    pub psyche: String,

    /// Avatar URL
    pub image: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
