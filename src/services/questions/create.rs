use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::models::{
    ApiResponse, ErrorCode,
    questions::requests::{CreateUserQuestionRequest, NewUserQuestion},
};
use crate::services::current_user;
use crate::utils::scoring::effective_weight;
use crate::utils::validate::{validate_name, validate_question_text, validate_weight};

pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    create_data: CreateUserQuestionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let weight = create_data.weight.unwrap_or(1.0);
    let validation = validate_question_text(&create_data.text)
        .and_then(|_| validate_name(&create_data.category))
        .and_then(|_| validate_weight(weight));
    if let Err(msg) = validation {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let storage = service.get_storage(request)?;
    let new_question = NewUserQuestion {
        text: create_data.text.trim().to_string(),
        category: create_data.category.trim().to_string(),
        weight: effective_weight(weight),
        created_by: user.id.clone(),
        is_public: create_data.is_public,
    };

    match storage.create_user_question(new_question).await {
        Ok(question) => {
            info!("Question {} created by {}", question.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                question,
                "Question created successfully",
            )))
        }
        Err(e) => Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
            ErrorCode::QuestionCreationFailed,
            format!("Question creation failed: {}", e.message()),
        ))),
    }
}
