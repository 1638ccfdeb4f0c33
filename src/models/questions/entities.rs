use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户题库中的题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UserQuestion {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub weight: f64,
    // 创建者 ID，系统预置题目为 "system"
    pub created_by: String,
    pub is_public: bool,
    // 被引入评估的次数
    pub used_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserQuestion {
    pub const SYSTEM_OWNER: &'static str = "system";
}
