use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_evaluation};
use crate::models::ApiResponse;

pub async fn get_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match load_evaluation(&storage, evaluation_id).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Evaluation information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
