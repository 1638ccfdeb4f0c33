use super::entities::UserQuestion;
use serde::Serialize;
use ts_rs::TS;

// 题目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UserQuestionListResponse {
    pub items: Vec<UserQuestion>,
}
