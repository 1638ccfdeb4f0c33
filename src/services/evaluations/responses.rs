use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_owned_evaluation};
use crate::models::{ApiResponse, evaluations::responses::ResponseListResponse};
use crate::services::current_user;

pub async fn list_responses(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    if let Err(resp) = load_owned_evaluation(&storage, evaluation_id, &user).await {
        return Ok(resp);
    }

    match storage.list_responses(evaluation_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResponseListResponse { items },
            "Response list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve response list",
        )),
    }
}

// 所属评估已删除的答卷
pub async fn list_orphaned_responses(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_orphaned_responses().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResponseListResponse { items },
            "Orphaned responses retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve orphaned responses",
        )),
    }
}
