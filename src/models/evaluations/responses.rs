use super::entities::{Evaluation, EvaluationResponse};
use serde::Serialize;
use ts_rs::TS;

// 评估列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<Evaluation>,
}

// 答卷列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ResponseListResponse {
    pub items: Vec<EvaluationResponse>,
}

// 单题统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct QuestionResult {
    pub index: usize,
    pub text: String,
    pub category: String,
    // 参与计算的有效权重
    pub weight: f64,
    // 作答人数
    pub answers: usize,
    pub average: f64,
}

// 评估结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationResults {
    pub evaluation_id: i64,
    pub app_name: String,
    pub respondents: usize,
    pub questions: Vec<QuestionResult>,
    // 0-5 加权平均
    pub weighted_average: f64,
    // 0-10 分制
    pub scaled_score: f64,
}

// 评估导出
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationExport {
    pub evaluation: Evaluation,
    pub responses: Vec<EvaluationResponse>,
    pub results: EvaluationResults,
    pub exported_at: chrono::DateTime<chrono::Utc>,
}

// 当前答题人的答卷，附带作答进度
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct MyResponseDetail {
    #[serde(flatten)]
    pub response: EvaluationResponse,
    // 已作答题目百分比 0-100
    pub progress: u32,
}
