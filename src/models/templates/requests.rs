use super::entities::TemplateQuestion;
use serde::Deserialize;
use ts_rs::TS;

// 创建模板请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub questions: Vec<TemplateQuestion>,
}

// 新建模板（用于存储层）
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub questions: Vec<TemplateQuestion>,
    pub created_by: Option<String>,
}
