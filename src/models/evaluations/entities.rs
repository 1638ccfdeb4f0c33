use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// 评估中的题目（按值嵌入评估与答卷）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Question {
    // 题目文本
    pub text: String,
    // 分类
    pub category: String,
    // 权重，缺省或 null 时为 1
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
    // Likert 评分 1..=5，未作答为 null
    #[serde(default)]
    pub likert_score: Option<i32>,
    // 评语
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
}

pub(crate) fn default_weight() -> f64 {
    1.0
}

/// 权重字段允许为 null，按缺省值处理
pub(crate) fn deserialize_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_weight))
}

impl Question {
    /// 以模板内容创建未作答的题目
    pub fn blank(text: impl Into<String>, category: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            weight,
            likert_score: None,
            comment: String::new(),
            order: None,
            is_custom: None,
        }
    }

    /// 清除作答内容，保留题目本身
    pub fn cleared(&self) -> Self {
        Self {
            likert_score: None,
            comment: String::new(),
            ..self.clone()
        }
    }
}

// 评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    // 被评估的应用名称
    pub app_name: String,
    pub description: Option<String>,
    // 所有答题人共同作答的题目模板
    pub questions: Vec<Question>,
    // 创建者
    pub evaluator_id: String,
    pub evaluator_email: String,
    pub total_score: f64,
    pub average_score: f64,
    pub is_template: bool,
    pub template_name: Option<String>,
    pub shared_with: Vec<String>,
    pub is_public: bool,
    pub responses_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluation {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.evaluator_id == user_id
    }
}

// 答卷：每位答题人对每个评估至多一份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationResponse {
    pub id: i64,
    // 所属评估；评估删除后为空（孤立答卷）
    pub evaluation_id: Option<i64>,
    // 作答时的评估 ID，不会被清空
    pub original_evaluation_id: i64,
    pub respondent_id: String,
    pub respondent_email: String,
    pub questions: Vec<Question>,
    pub total_score: f64,
    pub average_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl EvaluationResponse {
    pub fn is_orphaned(&self) -> bool {
        self.evaluation_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_null_weight_defaults_to_one() {
        let question: Question = serde_json::from_str(
            r#"{"text":"Q","category":"C","weight":null,"likert_score":3}"#,
        )
        .unwrap();
        assert_eq!(question.weight, 1.0);
        assert_eq!(question.likert_score, Some(3));

        let question: Question = serde_json::from_str(r#"{"text":"Q","category":"C"}"#).unwrap();
        assert_eq!(question.weight, 1.0);
        assert_eq!(question.likert_score, None);

        let question: Question =
            serde_json::from_str(r#"{"text":"Q","category":"C","weight":2.5}"#).unwrap();
        assert_eq!(question.weight, 2.5);
    }
}
