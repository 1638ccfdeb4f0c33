use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode, questions::requests::UpdateVisibilityRequest};
use crate::services::current_user;

pub async fn update_visibility(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    update_data: UpdateVisibilityRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.get_user_question_by_id(question_id).await {
        Ok(Some(question)) if question.created_by != user.id => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::QuestionPermissionDenied,
                "You can only change your own questions",
            )));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_error(&e, "Failed to get question")),
    }

    match storage
        .update_user_question_visibility(question_id, update_data.is_public)
        .await
    {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question visibility updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to update question visibility",
        )),
    }
}
