use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationService, load_owned_evaluation};
use crate::models::{ApiResponse, ErrorCode, evaluations::requests::UpdateEvaluationRequest};
use crate::services::current_user;
use crate::utils::scoring::effective_weight;
use crate::utils::validate::{validate_email, validate_name, validate_questions};

pub async fn update_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    mut update_data: UpdateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let evaluation = match load_owned_evaluation(&storage, evaluation_id, &user).await {
        Ok(evaluation) => evaluation,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_update_request(&update_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    if let Some(questions) = update_data.questions.as_mut() {
        // 有答卷后题目被锁定，否则已有答卷将无法按位置对齐
        if evaluation.responses_count > 0 {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EvaluationLocked,
                "Questions cannot be changed after the first response",
            )));
        }
        for (index, question) in questions.iter_mut().enumerate() {
            question.order = Some(index as i32 + 1);
            question.weight = effective_weight(question.weight);
        }
    }

    match storage.update_evaluation(evaluation_id, update_data).await {
        Ok(Some(evaluation)) => {
            info!("Evaluation {} updated by {}", evaluation_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                evaluation,
                "Evaluation updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "Evaluation not found",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e, "Evaluation update failed")),
    }
}

fn validate_update_request(update_data: &UpdateEvaluationRequest) -> Result<(), String> {
    if let Some(app_name) = &update_data.app_name {
        validate_name(app_name).map_err(|e| format!("app_name: {e}"))?;
    }
    if let Some(template_name) = &update_data.template_name {
        validate_name(template_name).map_err(|e| format!("template_name: {e}"))?;
    }
    if let Some(shared_with) = &update_data.shared_with {
        for email in shared_with {
            validate_email(email).map_err(|e| format!("shared_with '{email}': {e}"))?;
        }
    }
    if let Some(questions) = &update_data.questions {
        if questions.is_empty() {
            return Err("Evaluation must contain at least one question".to_string());
        }
        validate_questions(questions)?;
    }
    Ok(())
}
