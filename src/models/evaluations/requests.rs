use super::entities::Question;
use serde::Deserialize;
use ts_rs::TS;

// 创建评估请求
//
// 题目来源可以组合：
// - `questions`：直接提供的题目
// - `template_id`：从模板复制题目
// - `user_question_ids`：从题库复制题目，并增加其使用次数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub app_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub template_id: Option<i64>,
    #[serde(default)]
    pub user_question_ids: Vec<i64>,
    #[serde(default)]
    pub is_template: bool,
    pub template_name: Option<String>,
    #[serde(default)]
    pub shared_with: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

// 更新评估请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UpdateEvaluationRequest {
    pub app_name: Option<String>,
    pub description: Option<String>,
    // 仅在尚无答卷时允许修改
    pub questions: Option<Vec<Question>>,
    pub is_template: Option<bool>,
    pub template_name: Option<String>,
    pub shared_with: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

// 提交答卷请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitResponseRequest {
    pub questions: Vec<Question>,
}

// 新建评估（用于存储层，题目已解析完毕）
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub app_name: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub evaluator_id: String,
    pub evaluator_email: String,
    pub is_template: bool,
    pub template_name: Option<String>,
    pub shared_with: Vec<String>,
    pub is_public: bool,
}

// 答卷写入（用于存储层）
#[derive(Debug, Clone)]
pub struct ResponseUpsert {
    pub evaluation_id: i64,
    pub respondent_id: String,
    pub respondent_email: String,
    pub questions: Vec<Question>,
}
