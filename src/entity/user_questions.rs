//! 用户题库实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub category: String,
    pub weight: f64,
    pub created_by: String,
    pub is_public: bool,
    pub used_count: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user_question(self) -> crate::models::questions::entities::UserQuestion {
        use crate::models::questions::entities::UserQuestion;
        use chrono::{DateTime, Utc};

        UserQuestion {
            id: self.id,
            text: self.text,
            category: self.category,
            weight: self.weight,
            created_by: self.created_by,
            is_public: self.is_public,
            used_count: self.used_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
