use serde::Serialize;
use ts_rs::TS;

// Likert 选项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct LikertOption {
    pub value: i32,
    pub label: &'static str,
}

// COGA 认知无障碍分类
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CogaCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}
