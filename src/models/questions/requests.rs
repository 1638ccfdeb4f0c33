use serde::Deserialize;
use ts_rs::TS;

// 题目列表范围
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionScope {
    // 我创建的题目
    #[default]
    Mine,
    // 公开题目
    Public,
}

// 题目查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionQueryParams {
    #[serde(default)]
    pub scope: QuestionScope,
    pub category: Option<String>,
}

// 创建题目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateUserQuestionRequest {
    pub text: String,
    pub category: String,
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_public: bool,
}

// 修改可见性请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UpdateVisibilityRequest {
    pub is_public: bool,
}

// 新建题目（用于存储层）
#[derive(Debug, Clone)]
pub struct NewUserQuestion {
    pub text: String,
    pub category: String,
    pub weight: f64,
    pub created_by: String,
    pub is_public: bool,
}
