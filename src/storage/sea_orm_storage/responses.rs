//! 答卷存储操作

use super::SeaOrmStorage;
use super::evaluations::encode_questions;
use crate::entity::evaluation_responses::{
    ActiveModel, Column, Entity as EvaluationResponses, Model,
};
use crate::errors::{CogaError, Result};
use crate::models::evaluations::{entities::EvaluationResponse, requests::ResponseUpsert};
use crate::storage::UpsertOutcome;
use crate::utils::scoring::response_scores;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::{debug, warn};

impl SeaOrmStorage {
    /// 写入答卷
    ///
    /// 按 (评估, 答题人) 查找已有答卷：存在则覆盖并重新计分，否则新建并将评估答卷数加一。
    /// 答卷数与评估汇总分的更新失败只记录日志，不影响本次写入。
    pub async fn upsert_response_impl(&self, req: ResponseUpsert) -> Result<UpsertOutcome> {
        let evaluation_id = req.evaluation_id;
        let existing = self
            .find_respondent_row(evaluation_id, &req.respondent_id)
            .await?;
        let (model, created) = self.write_response(req, existing).await?;

        if created
            && let Err(e) = self.increment_responses_count_impl(evaluation_id).await
        {
            warn!(
                "Failed to increment responses count for evaluation {}: {}",
                evaluation_id, e
            );
        }

        if let Err(e) = self.recompute_evaluation_scores_impl(evaluation_id).await {
            warn!(
                "Failed to recompute scores for evaluation {}: {}",
                evaluation_id, e
            );
        }

        debug!(
            "Response {} for evaluation {} {}",
            model.id,
            evaluation_id,
            if created { "created" } else { "overwritten" }
        );

        Ok(UpsertOutcome {
            response: model.into_response(),
            created,
        })
    }

    async fn find_respondent_row(
        &self,
        evaluation_id: i64,
        respondent_id: &str,
    ) -> Result<Option<Model>> {
        EvaluationResponses::find()
            .filter(Column::OriginalEvaluationId.eq(evaluation_id))
            .filter(Column::RespondentId.eq(respondent_id))
            .one(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询答卷失败: {e}")))
    }

    /// 按查找结果覆盖或新建答卷，返回写入后的行以及是否为新建
    async fn write_response(
        &self,
        req: ResponseUpsert,
        existing: Option<Model>,
    ) -> Result<(Model, bool)> {
        if let Some(existing) = existing {
            return Ok((self.overwrite_response(existing.id, req).await?, false));
        }

        let now = chrono::Utc::now().timestamp();
        let scores = response_scores(&req.questions);
        let model = ActiveModel {
            evaluation_id: Set(Some(req.evaluation_id)),
            original_evaluation_id: Set(req.evaluation_id),
            respondent_id: Set(req.respondent_id.clone()),
            respondent_email: Set(req.respondent_email.clone()),
            questions: Set(encode_questions(&req.questions)?),
            total_score: Set(scores.total_score),
            average_score: Set(scores.average_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok((inserted, true)),
            // 同一答题人并发提交，另一请求已先插入，改为覆盖
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let winner = self
                    .find_respondent_row(req.evaluation_id, &req.respondent_id)
                    .await?
                    .ok_or_else(|| CogaError::database_operation(format!("创建答卷失败: {e}")))?;
                Ok((self.overwrite_response(winner.id, req).await?, false))
            }
            Err(e) => Err(CogaError::database_operation(format!("创建答卷失败: {e}"))),
        }
    }

    async fn overwrite_response(&self, id: i64, req: ResponseUpsert) -> Result<Model> {
        let scores = response_scores(&req.questions);
        let model = ActiveModel {
            id: Set(id),
            respondent_email: Set(req.respondent_email),
            questions: Set(encode_questions(&req.questions)?),
            total_score: Set(scores.total_score),
            average_score: Set(scores.average_score),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        model
            .update(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("更新答卷失败: {e}")))
    }

    /// 获取答题人对评估的答卷
    pub async fn get_response_by_respondent_impl(
        &self,
        evaluation_id: i64,
        respondent_id: &str,
    ) -> Result<Option<EvaluationResponse>> {
        let result = EvaluationResponses::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .filter(Column::RespondentId.eq(respondent_id))
            .one(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询答卷失败: {e}")))?;

        Ok(result.map(|m| m.into_response()))
    }

    /// 列出评估的全部答卷
    pub async fn list_responses_impl(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>> {
        let responses = EvaluationResponses::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询答卷列表失败: {e}")))?;

        Ok(responses.into_iter().map(|m| m.into_response()).collect())
    }

    /// 列出孤立答卷
    pub async fn list_orphaned_responses_impl(&self) -> Result<Vec<EvaluationResponse>> {
        let responses = EvaluationResponses::find()
            .filter(Column::EvaluationId.is_null())
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询孤立答卷失败: {e}")))?;

        Ok(responses.into_iter().map(|m| m.into_response()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_storage, sample_evaluation};
    use super::*;
    use crate::models::evaluations::entities::Question;

    fn answered(weight: f64, score: Option<i32>) -> Question {
        Question {
            likert_score: score,
            ..Question::blank("Pergunta", "Categoria", weight)
        }
    }

    fn upsert(evaluation_id: i64, respondent: &str, questions: Vec<Question>) -> ResponseUpsert {
        ResponseUpsert {
            evaluation_id,
            respondent_id: respondent.to_string(),
            respondent_email: format!("{respondent}@example.com"),
            questions,
        }
    }

    #[tokio::test]
    async fn test_resubmission_keeps_single_response() {
        let storage = memory_storage().await;
        let evaluation = storage
            .create_evaluation_impl(sample_evaluation("admin-1", vec![answered(1.0, None)]))
            .await
            .unwrap();

        let first = storage
            .upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(2))]))
            .await
            .unwrap();
        assert!(first.created);

        let second = storage
            .upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(5))]))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.response.id, first.response.id);
        assert_eq!(second.response.average_score, 5.0);

        let responses = storage.list_responses_impl(evaluation.id).await.unwrap();
        assert_eq!(responses.len(), 1);

        let parent = storage
            .get_evaluation_by_id_impl(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parent.responses_count, 1);
        assert_eq!(parent.average_score, 5.0);
    }

    #[tokio::test]
    async fn test_stale_lookup_falls_back_to_overwrite() {
        let storage = memory_storage().await;
        let evaluation = storage
            .create_evaluation_impl(sample_evaluation("admin-1", vec![answered(1.0, None)]))
            .await
            .unwrap();
        let first = storage
            .upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(2))]))
            .await
            .unwrap();

        // 查找时尚无答卷，插入时已被另一请求写入
        let (model, created) = storage
            .write_response(
                upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(4))]),
                None,
            )
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(model.id, first.response.id);
        assert_eq!(model.average_score, 4.0);
        assert_eq!(storage.list_responses_impl(evaluation.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_submissions() {
        let storage = memory_storage().await;
        let evaluation = storage
            .create_evaluation_impl(sample_evaluation("admin-1", vec![answered(1.0, None)]))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            storage.upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(1))])),
            storage.upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(3))])),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.response.id, b.response.id);
        assert_eq!([a.created, b.created].iter().filter(|c| **c).count(), 1);

        let parent = storage
            .get_evaluation_by_id_impl(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parent.responses_count, 1);
    }

    #[tokio::test]
    async fn test_aggregate_across_respondents() {
        let storage = memory_storage().await;
        let evaluation = storage
            .create_evaluation_impl(sample_evaluation(
                "admin-1",
                vec![answered(2.0, None), answered(1.0, None)],
            ))
            .await
            .unwrap();

        storage
            .upsert_response_impl(upsert(
                evaluation.id,
                "eval-1",
                vec![answered(2.0, Some(3)), answered(1.0, Some(4))],
            ))
            .await
            .unwrap();
        storage
            .upsert_response_impl(upsert(
                evaluation.id,
                "eval-2",
                vec![answered(2.0, Some(5)), answered(1.0, None)],
            ))
            .await
            .unwrap();

        let parent = storage
            .get_evaluation_by_id_impl(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parent.responses_count, 2);
        assert!((parent.average_score - 4.0).abs() < 1e-9);
        assert!((parent.total_score - 8.0).abs() < 1e-9);

        let mine = storage
            .get_response_by_respondent_impl(evaluation.id, "eval-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mine.questions[0].likert_score, Some(5));
    }

    #[tokio::test]
    async fn test_delete_evaluation_orphans_responses() {
        let storage = memory_storage().await;
        let evaluation = storage
            .create_evaluation_impl(sample_evaluation("admin-1", vec![answered(1.0, None)]))
            .await
            .unwrap();
        storage
            .upsert_response_impl(upsert(evaluation.id, "eval-1", vec![answered(1.0, Some(3))]))
            .await
            .unwrap();

        assert!(storage.delete_evaluation_impl(evaluation.id).await.unwrap());
        assert!(
            storage
                .get_evaluation_by_id_impl(evaluation.id)
                .await
                .unwrap()
                .is_none()
        );

        // 答卷仍然存在，但不再关联任何评估
        assert!(
            storage
                .list_responses_impl(evaluation.id)
                .await
                .unwrap()
                .is_empty()
        );
        let orphans = storage.list_orphaned_responses_impl().await.unwrap();
        assert_eq!(orphans.len(), 1);
        assert!(orphans[0].is_orphaned());
        assert_eq!(orphans[0].original_evaluation_id, evaluation.id);
        assert_eq!(orphans[0].questions[0].likert_score, Some(3));
    }
}
