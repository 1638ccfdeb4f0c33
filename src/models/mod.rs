pub mod auth;
pub mod catalog;
pub mod common;
pub mod evaluations;
pub mod questions;
pub mod templates;

pub use common::*;

use serde::Serialize;
use ts_rs::TS;

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 评估 2xxx
    EvaluationNotFound = 2000,
    EvaluationCreationFailed = 2001,
    EvaluationUpdateFailed = 2002,
    EvaluationDeleteFailed = 2003,
    EvaluationLocked = 2004,
    EvaluationPermissionDenied = 2005,

    // 答卷 3xxx
    ResponseNotFound = 3000,
    ResponseMismatch = 3001,
    ResponseSaveFailed = 3002,

    // 题目 4xxx
    QuestionNotFound = 4000,
    QuestionCreationFailed = 4001,
    QuestionPermissionDenied = 4002,

    // 模板 5xxx（5000 保留给服务器内部错误）
    InternalServerError = 5000,
    TemplateNotFound = 5100,
    TemplateReadOnly = 5101,
    TemplateCreationFailed = 5102,
}

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
