//! 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub app_name: String,
    pub description: Option<String>,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub evaluator_id: String,
    pub evaluator_email: String,
    pub total_score: f64,
    pub average_score: f64,
    pub is_template: bool,
    pub template_name: Option<String>,
    /// JSON 数组
    #[sea_orm(column_type = "Text", nullable)]
    pub shared_with: Option<String>,
    pub is_public: bool,
    pub responses_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluation_responses::Entity")]
    Responses,
}

impl Related<super::evaluation_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::Evaluation;
        use chrono::{DateTime, Utc};

        Evaluation {
            questions: super::decode_json_column(&self.questions, "evaluations.questions"),
            shared_with: self
                .shared_with
                .as_deref()
                .map(|raw| super::decode_json_column(raw, "evaluations.shared_with"))
                .unwrap_or_default(),
            id: self.id,
            app_name: self.app_name,
            description: self.description,
            evaluator_id: self.evaluator_id,
            evaluator_email: self.evaluator_email,
            total_score: self.total_score,
            average_score: self.average_score,
            is_template: self.is_template,
            template_name: self.template_name,
            is_public: self.is_public,
            responses_count: self.responses_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
