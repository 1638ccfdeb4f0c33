//! 题库存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::user_questions::{ActiveModel, Column, Entity as UserQuestions};
use crate::errors::{CogaError, Result};
use crate::models::questions::{
    entities::UserQuestion,
    requests::{NewUserQuestion, QuestionScope},
};
use sea_orm::sea_query::Expr;
use sea_orm::ExprTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_user_question_impl(&self, req: NewUserQuestion) -> Result<UserQuestion> {
        let model = ActiveModel {
            text: Set(req.text),
            category: Set(req.category),
            weight: Set(req.weight),
            created_by: Set(req.created_by),
            is_public: Set(req.is_public),
            used_count: Set(0),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_user_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_user_question_by_id_impl(&self, id: i64) -> Result<Option<UserQuestion>> {
        let result = UserQuestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_user_question()))
    }

    /// 按 ID 批量获取题目，结果按传入顺序排列，不存在的 ID 被忽略
    pub async fn get_user_questions_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<UserQuestion>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: HashMap<i64, UserQuestion> = UserQuestions::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询题目失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_user_question()))
            .collect();

        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }

    /// 按范围列出题目
    ///
    /// - `Mine`：当前用户创建的题目，新的在前
    /// - `Public`：公开题目，按使用次数降序，再按创建时间降序
    pub async fn list_user_questions_impl(
        &self,
        user_id: &str,
        scope: QuestionScope,
        category: Option<&str>,
    ) -> Result<Vec<UserQuestion>> {
        let mut select = match scope {
            QuestionScope::Mine => UserQuestions::find()
                .filter(Column::CreatedBy.eq(user_id))
                .order_by_desc(Column::CreatedAt),
            QuestionScope::Public => UserQuestions::find()
                .filter(Column::IsPublic.eq(true))
                .order_by_desc(Column::UsedCount)
                .order_by_desc(Column::CreatedAt),
        };

        if let Some(category) = category
            && !category.trim().is_empty()
        {
            select = select.filter(Column::Category.eq(category.trim()));
        }

        let questions = select
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(questions
            .into_iter()
            .map(|m| m.into_user_question())
            .collect())
    }

    /// 修改题目可见性
    pub async fn update_user_question_visibility_impl(
        &self,
        id: i64,
        is_public: bool,
    ) -> Result<Option<UserQuestion>> {
        if self.get_user_question_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            is_public: Set(is_public),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("更新题目可见性失败: {e}")))?;

        Ok(Some(updated.into_user_question()))
    }

    /// 删除题目
    pub async fn delete_user_question_impl(&self, id: i64) -> Result<bool> {
        let result = UserQuestions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 增加题目使用次数，同一 id 出现几次就加几次
    pub async fn increment_question_usage_impl(&self, ids: &[i64]) -> Result<u64> {
        let mut occurrences: HashMap<i64, i32> = HashMap::new();
        for id in ids {
            *occurrences.entry(*id).or_default() += 1;
        }

        let mut updated = 0;
        for (id, times) in occurrences {
            let result = UserQuestions::update_many()
                .col_expr(Column::UsedCount, Expr::col(Column::UsedCount).add(times))
                .filter(Column::Id.eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| CogaError::database_operation(format!("更新题目使用次数失败: {e}")))?;
            updated += result.rows_affected;
        }
        Ok(updated)
    }

    /// 题目总数
    pub async fn count_user_questions_impl(&self) -> Result<u64> {
        UserQuestions::find()
            .count(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询题目总数失败: {e}")))
    }
}
