//! 答卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 评估删除后置空
    pub evaluation_id: Option<i64>,
    pub original_evaluation_id: i64,
    pub respondent_id: String,
    pub respondent_email: String,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub total_score: f64,
    pub average_score: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id",
        on_delete = "SetNull"
    )]
    Evaluation,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_response(self) -> crate::models::evaluations::entities::EvaluationResponse {
        use crate::models::evaluations::entities::EvaluationResponse;
        use chrono::{DateTime, Utc};

        EvaluationResponse {
            questions: super::decode_json_column(
                &self.questions,
                "evaluation_responses.questions",
            ),
            id: self.id,
            evaluation_id: self.evaluation_id,
            original_evaluation_id: self.original_evaluation_id,
            respondent_id: self.respondent_id,
            respondent_email: self.respondent_email,
            total_score: self.total_score,
            average_score: self.average_score,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
