use std::sync::Arc;

use crate::models::{
    evaluations::{
        entities::{Evaluation, EvaluationResponse},
        requests::{NewEvaluation, ResponseUpsert, UpdateEvaluationRequest},
    },
    questions::{
        entities::UserQuestion,
        requests::{NewUserQuestion, QuestionScope},
    },
    templates::{entities::Template, requests::NewTemplate},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 答卷写入结果
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub response: EvaluationResponse,
    // true 表示新建，false 表示覆盖已有答卷
    pub created: bool,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 评估管理方法
    // 创建评估
    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<Evaluation>;
    // 通过ID获取评估
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>>;
    // 列出评估，指定 owner_id 时只返回该用户创建的评估，按创建时间倒序
    async fn list_evaluations(&self, owner_id: Option<&str>) -> Result<Vec<Evaluation>>;
    // 更新评估
    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>>;
    // 删除评估，答卷保留为孤立记录
    async fn delete_evaluation(&self, id: i64) -> Result<bool>;
    // 根据全部答卷重新计算评估的汇总分
    async fn recompute_evaluation_scores(&self, id: i64) -> Result<Option<Evaluation>>;

    /// 答卷管理方法
    // 写入答卷：同一答题人对同一评估只保留一份
    async fn upsert_response(&self, upsert: ResponseUpsert) -> Result<UpsertOutcome>;
    // 获取答题人对评估的答卷
    async fn get_response_by_respondent(
        &self,
        evaluation_id: i64,
        respondent_id: &str,
    ) -> Result<Option<EvaluationResponse>>;
    // 列出评估的全部答卷
    async fn list_responses(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>>;
    // 列出所属评估已删除的答卷
    async fn list_orphaned_responses(&self) -> Result<Vec<EvaluationResponse>>;

    /// 题库管理方法
    // 创建题目
    async fn create_user_question(&self, question: NewUserQuestion) -> Result<UserQuestion>;
    // 通过ID获取题目
    async fn get_user_question_by_id(&self, id: i64) -> Result<Option<UserQuestion>>;
    // 按ID批量获取题目，保持传入顺序
    async fn get_user_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<UserQuestion>>;
    // 按范围列出题目
    async fn list_user_questions(
        &self,
        user_id: &str,
        scope: QuestionScope,
        category: Option<&str>,
    ) -> Result<Vec<UserQuestion>>;
    // 修改题目可见性
    async fn update_user_question_visibility(
        &self,
        id: i64,
        is_public: bool,
    ) -> Result<Option<UserQuestion>>;
    // 删除题目
    async fn delete_user_question(&self, id: i64) -> Result<bool>;
    // 增加题目使用次数，返回更新的题目数
    async fn increment_question_usage(&self, ids: &[i64]) -> Result<u64>;
    // 题目总数
    async fn count_user_questions(&self) -> Result<u64>;

    /// 模板管理方法
    // 创建模板
    async fn create_template(&self, template: NewTemplate) -> Result<Template>;
    // 通过ID获取模板
    async fn get_template_by_id(&self, id: i64) -> Result<Option<Template>>;
    // 列出全部模板
    async fn list_templates(&self) -> Result<Vec<Template>>;
    // 删除模板
    async fn delete_template(&self, id: i64) -> Result<bool>;
    // 模板总数
    async fn count_templates(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
