//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 嵌入的题目列表以 JSON 文本列存储。

pub mod prelude;

pub mod evaluation_responses;
pub mod evaluations;
pub mod question_templates;
pub mod user_questions;

use serde::de::DeserializeOwned;
use tracing::warn;

/// 解析 JSON 文本列，损坏的数据按空值处理
pub(crate) fn decode_json_column<T: DeserializeOwned + Default>(raw: &str, column: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Failed to decode JSON column {}: {}", column, e);
        T::default()
    })
}
