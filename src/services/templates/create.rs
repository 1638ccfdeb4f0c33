use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TemplateService;
use crate::models::{
    ApiResponse, ErrorCode,
    templates::requests::{CreateTemplateRequest, NewTemplate},
};
use crate::services::current_user;
use crate::models::templates::entities::TemplateQuestion;
use crate::utils::scoring::effective_weight;
use crate::utils::validate::{validate_name, validate_question_text, validate_weight};

pub async fn create_template(
    service: &TemplateService,
    request: &HttpRequest,
    create_data: CreateTemplateRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_create_request(&create_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let storage = service.get_storage(request)?;
    let new_template = NewTemplate {
        name: create_data.name.trim().to_string(),
        category: create_data.category.trim().to_string(),
        description: create_data.description,
        questions: create_data
            .questions
            .into_iter()
            .map(|q| TemplateQuestion {
                weight: effective_weight(q.weight),
                ..q
            })
            .collect(),
        created_by: Some(user.id.clone()),
    };

    match storage.create_template(new_template).await {
        Ok(template) => {
            info!("Template {} created by {}", template.id, user.id);
            service.invalidate_list_cache(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                template,
                "Template created successfully",
            )))
        }
        Err(e) => Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
            ErrorCode::TemplateCreationFailed,
            format!("Template creation failed: {}", e.message()),
        ))),
    }
}

fn validate_create_request(create_data: &CreateTemplateRequest) -> Result<(), String> {
    validate_name(&create_data.name).map_err(|e| format!("name: {e}"))?;
    validate_name(&create_data.category).map_err(|e| format!("category: {e}"))?;
    if create_data.questions.is_empty() {
        return Err("Template must contain at least one question".to_string());
    }
    for (index, question) in create_data.questions.iter().enumerate() {
        let position = index + 1;
        validate_question_text(&question.text).map_err(|e| format!("第 {position} 题: {e}"))?;
        validate_weight(question.weight).map_err(|e| format!("第 {position} 题: {e}"))?;
    }
    Ok(())
}
