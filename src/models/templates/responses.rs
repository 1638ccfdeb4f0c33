use super::entities::Template;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 模板列表响应（同时作为缓存值）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct TemplateListResponse {
    pub items: Vec<Template>,
}
