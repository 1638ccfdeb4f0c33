pub mod auth;
pub mod catalog;
pub mod evaluations;
pub mod questions;
pub mod templates;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use evaluations::EvaluationService;
pub use questions::QuestionService;
pub use templates::TemplateService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::ErrorInternalServerError};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::entities::AuthUser};
use crate::storage::Storage;

// 从应用状态中获取存储实例
pub(crate) fn storage_from_request(
    storage: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = storage {
        return Ok(storage.clone());
    }
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| ErrorInternalServerError("Storage not found in app data"))
}

// 当前身份，缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user identity",
        ))
    })
}
