//! 题目模板存储操作

use super::SeaOrmStorage;
use crate::entity::question_templates::{ActiveModel, Column, Entity as QuestionTemplates};
use crate::errors::{CogaError, Result};
use crate::models::templates::{entities::Template, requests::NewTemplate};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建模板
    pub async fn create_template_impl(&self, req: NewTemplate) -> Result<Template> {
        let questions = serde_json::to_string(&req.questions)
            .map_err(|e| CogaError::serialization(format!("序列化模板题目失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            category: Set(req.category),
            description: Set(req.description),
            questions: Set(questions),
            created_by: Set(req.created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("创建模板失败: {e}")))?;

        Ok(result.into_template())
    }

    /// 通过 ID 获取模板
    pub async fn get_template_by_id_impl(&self, id: i64) -> Result<Option<Template>> {
        let result = QuestionTemplates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询模板失败: {e}")))?;

        Ok(result.map(|m| m.into_template()))
    }

    /// 列出全部模板（预置模板在前）
    pub async fn list_templates_impl(&self) -> Result<Vec<Template>> {
        let templates = QuestionTemplates::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询模板列表失败: {e}")))?;

        let (mut predefined, user_created): (Vec<_>, Vec<_>) = templates
            .into_iter()
            .map(|m| m.into_template())
            .partition(|t| t.is_predefined());
        predefined.extend(user_created);

        Ok(predefined)
    }

    /// 删除模板
    pub async fn delete_template_impl(&self, id: i64) -> Result<bool> {
        let result = QuestionTemplates::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("删除模板失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 模板总数
    pub async fn count_templates_impl(&self) -> Result<u64> {
        QuestionTemplates::find()
            .count(&self.db)
            .await
            .map_err(|e| CogaError::database_operation(format!("查询模板总数失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::templates::entities::TemplateQuestion;

    fn new_template(name: &str, created_by: Option<&str>) -> NewTemplate {
        NewTemplate {
            name: name.to_string(),
            category: "Acessibilidade".to_string(),
            description: None,
            questions: vec![TemplateQuestion {
                text: "A aplicação é navegável apenas com teclado?".to_string(),
                category: "Acessibilidade".to_string(),
                weight: 2.0,
            }],
            created_by: created_by.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_predefined_listed_first() {
        let storage = memory_storage().await;
        storage
            .create_template_impl(new_template("Meu modelo", Some("user-1")))
            .await
            .unwrap();
        storage
            .create_template_impl(new_template("Acessibilidade Web Básica", None))
            .await
            .unwrap();

        let templates = storage.list_templates_impl().await.unwrap();
        assert_eq!(templates.len(), 2);
        assert!(templates[0].is_predefined());
        assert_eq!(templates[1].created_by.as_deref(), Some("user-1"));
        assert_eq!(templates[0].questions[0].weight, 2.0);
        assert_eq!(storage.count_templates_impl().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_template() {
        let storage = memory_storage().await;
        let template = storage
            .create_template_impl(new_template("Temporário", Some("user-1")))
            .await
            .unwrap();
        assert!(storage.delete_template_impl(template.id).await.unwrap());
        assert!(
            storage
                .get_template_by_id_impl(template.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
