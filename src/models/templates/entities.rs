use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluations::entities::{Question, default_weight, deserialize_weight};

// 模板中的题目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct TemplateQuestion {
    pub text: String,
    pub category: String,
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
}

impl TemplateQuestion {
    /// 复制为评估中的未作答题目
    pub fn to_question(&self) -> Question {
        Question::blank(self.text.clone(), self.category.clone(), self.weight)
    }
}

// 题目模板
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub questions: Vec<TemplateQuestion>,
    // 创建者，预置模板为空
    pub created_by: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Template {
    pub fn is_predefined(&self) -> bool {
        self.created_by.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_question_null_weight() {
        let question: TemplateQuestion =
            serde_json::from_str(r#"{"text":"Q","category":"C","weight":null}"#).unwrap();
        assert_eq!(question.weight, 1.0);
        assert_eq!(question.to_question().weight, 1.0);
    }
}
