//! 评估存储操作

use super::SeaOrmStorage;
use crate::entity::evaluation_responses::{
    Column as ResponseColumn, Entity as EvaluationResponses,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::errors::{CogaError, Result};
use crate::models::evaluations::{
    entities::{Evaluation, Question},
    requests::{NewEvaluation, UpdateEvaluationRequest},
};
use crate::utils::scoring::{aggregate_scores, question_averages, response_scores};
use sea_orm::sea_query::Expr;
use sea_orm::ExprTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

pub(super) fn encode_questions(questions: &[Question]) -> Result<String> {
    serde_json::to_string(questions)
        .map_err(|e| CogaError::serialization(format!("序列化题目失败: {e}")))
}

fn encode_shared_with(shared_with: &[String]) -> Result<Option<String>> {
    if shared_with.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(shared_with)
        .map(Some)
        .map_err(|e| CogaError::serialization(format!("序列化共享列表失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建评估
    pub async fn create_evaluation_impl(&self, req: NewEvaluation) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();
        // 尚无答卷时，汇总分取自题目本身的评分
        let scores = response_scores(&req.questions);

        let model = ActiveModel {
            app_name: Set(req.app_name),
            description: Set(req.description),
            questions: Set(encode_questions(&req.questions)?),
            evaluator_id: Set(req.evaluator_id),
            evaluator_email: Set(req.evaluator_email),
            total_score: Set(scores.total_score),
            average_score: Set(scores.average_score),
            is_template: Set(req.is_template),
            template_name: Set(req.template_name),
            shared_with: Set(encode_shared_with(&req.shared_with)?),
            is_public: Set(req.is_public),
            responses_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("创建评估失败: {e}")))?;

        Ok(result.into_evaluation())
    }

    /// 通过 ID 获取评估
    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询评估失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 列出评估（新的在前）
    pub async fn list_evaluations_impl(&self, owner_id: Option<&str>) -> Result<Vec<Evaluation>> {
        let mut select = Evaluations::find();

        if let Some(owner_id) = owner_id {
            select = select.filter(Column::EvaluatorId.eq(owner_id));
        }

        let evaluations = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询评估列表失败: {e}")))?;

        Ok(evaluations
            .into_iter()
            .map(|m| m.into_evaluation())
            .collect())
    }

    /// 更新评估
    ///
    /// 修改题目时重新计算汇总分；是否允许修改题目由服务层判断。
    pub async fn update_evaluation_impl(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        // 先检查评估是否存在
        let existing = self.get_evaluation_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(app_name) = update.app_name {
            model.app_name = Set(app_name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(questions) = update.questions {
            let scores = response_scores(&questions);
            model.questions = Set(encode_questions(&questions)?);
            model.total_score = Set(scores.total_score);
            model.average_score = Set(scores.average_score);
        }

        if let Some(is_template) = update.is_template {
            model.is_template = Set(is_template);
        }

        if let Some(template_name) = update.template_name {
            model.template_name = Set(Some(template_name));
        }

        if let Some(shared_with) = update.shared_with {
            model.shared_with = Set(encode_shared_with(&shared_with)?);
        }

        if let Some(is_public) = update.is_public {
            model.is_public = Set(is_public);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("更新评估失败: {e}")))?;

        self.get_evaluation_by_id_impl(id).await
    }

    /// 删除评估
    ///
    /// 答卷不会级联删除：所属评估被置空，原评估 ID 保留。
    pub async fn delete_evaluation_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CogaError::database_operation(format!("开启事务失败: {e}")))?;

        EvaluationResponses::update_many()
            .col_expr(
                ResponseColumn::EvaluationId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(ResponseColumn::EvaluationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| CogaError::database_operation(format!("解除答卷关联失败: {e}")))?;

        let result = Evaluations::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CogaError::database_operation(format!("删除评估失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CogaError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 根据全部答卷重新计算评估的汇总分
    pub async fn recompute_evaluation_scores_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let Some(evaluation) = self.get_evaluation_by_id_impl(id).await? else {
            return Ok(None);
        };

        let responses = self.list_responses_impl(id).await?;
        let answers: Vec<&[Question]> = responses.iter().map(|r| r.questions.as_slice()).collect();
        let scores = aggregate_scores(&question_averages(&evaluation.questions, &answers));

        let model = ActiveModel {
            id: Set(id),
            total_score: Set(scores.total_score),
            average_score: Set(scores.average_score),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("更新评估汇总分失败: {e}")))?;

        self.get_evaluation_by_id_impl(id).await
    }

    /// 答卷数加一
    pub(super) async fn increment_responses_count_impl(&self, id: i64) -> Result<()> {
        let result = Evaluations::update_many()
            .col_expr(
                Column::ResponsesCount,
                Expr::col(Column::ResponsesCount).add(1),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("更新答卷数失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(CogaError::not_found(format!("评估 {id} 不存在")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_storage, sample_evaluation as new_evaluation};
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = memory_storage().await;
        let created = storage
            .create_evaluation_impl(new_evaluation(
                "admin-1",
                vec![Question::blank("Texto claro?", "Compreensão", 2.0)],
            ))
            .await
            .unwrap();

        let fetched = storage
            .get_evaluation_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.app_name, "Portal do Aluno");
        assert_eq!(fetched.questions.len(), 1);
        assert_eq!(fetched.questions[0].weight, 2.0);
        assert_eq!(fetched.responses_count, 0);
        assert_eq!(fetched.average_score, 0.0);
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let storage = memory_storage().await;
        for owner in ["admin-1", "admin-2", "admin-1"] {
            storage
                .create_evaluation_impl(new_evaluation(owner, vec![]))
                .await
                .unwrap();
        }

        assert_eq!(storage.list_evaluations_impl(None).await.unwrap().len(), 3);
        let mine = storage
            .list_evaluations_impl(Some("admin-1"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.evaluator_id == "admin-1"));
        // 新的在前
        assert!(mine[0].id > mine[1].id);
    }

    #[tokio::test]
    async fn test_update_questions_recomputes_scores() {
        let storage = memory_storage().await;
        let created = storage
            .create_evaluation_impl(new_evaluation("admin-1", vec![]))
            .await
            .unwrap();

        let mut answered = Question::blank("Contraste adequado?", "Visibilidade", 1.0);
        answered.likert_score = Some(4);
        let updated = storage
            .update_evaluation_impl(
                created.id,
                UpdateEvaluationRequest {
                    app_name: Some("Novo nome".to_string()),
                    description: None,
                    questions: Some(vec![answered]),
                    is_template: None,
                    template_name: None,
                    shared_with: Some(vec!["colega@example.com".to_string()]),
                    is_public: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.app_name, "Novo nome");
        assert_eq!(updated.total_score, 4.0);
        assert_eq!(updated.average_score, 4.0);
        assert_eq!(updated.shared_with, vec!["colega@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let storage = memory_storage().await;
        let result = storage
            .update_evaluation_impl(
                999,
                UpdateEvaluationRequest {
                    app_name: Some("x".to_string()),
                    description: None,
                    questions: None,
                    is_template: None,
                    template_name: None,
                    shared_with: None,
                    is_public: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(!storage.delete_evaluation_impl(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_responses_count() {
        let storage = memory_storage().await;
        let created = storage
            .create_evaluation_impl(new_evaluation("admin-1", vec![]))
            .await
            .unwrap();

        storage.increment_responses_count_impl(created.id).await.unwrap();
        storage.increment_responses_count_impl(created.id).await.unwrap();
        let fetched = storage
            .get_evaluation_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.responses_count, 2);

        let missing = storage.increment_responses_count_impl(999).await;
        assert!(matches!(missing, Err(CogaError::NotFound(_))));
    }
}
