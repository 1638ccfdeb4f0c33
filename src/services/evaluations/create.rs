use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::EvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::entities::AuthUser,
    evaluations::{
        entities::Question,
        requests::{CreateEvaluationRequest, NewEvaluation},
    },
};
use crate::services::current_user;
use crate::storage::Storage;
use crate::utils::scoring::effective_weight;
use crate::utils::validate::{validate_email, validate_name, validate_questions};

pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    create_data: CreateEvaluationRequest,
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

    let questions = match collect_questions(&storage, &user, &create_data).await {
        Ok(questions) => questions,
        Err(resp) => return Ok(resp),
    };

    if questions.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Evaluation must contain at least one question",
        )));
    }

    let new_evaluation = NewEvaluation {
        app_name: create_data.app_name.trim().to_string(),
        description: create_data.description,
        questions,
        evaluator_id: user.id.clone(),
        evaluator_email: user.email.clone(),
        is_template: create_data.is_template,
        template_name: create_data.template_name,
        shared_with: create_data.shared_with,
        is_public: create_data.is_public,
    };

    match storage.create_evaluation(new_evaluation).await {
        Ok(evaluation) => {
            info!(
                "Evaluation {} ({}) created by {}",
                evaluation.id, evaluation.app_name, user.id
            );

            // 使用次数只做统计，失败不影响创建结果
            if !create_data.user_question_ids.is_empty()
                && let Err(e) = storage
                    .increment_question_usage(&create_data.user_question_ids)
                    .await
            {
                warn!(
                    "Failed to increment usage for questions {:?}: {}",
                    create_data.user_question_ids, e
                );
            }

            Ok(HttpResponse::Created().json(ApiResponse::success(
                evaluation,
                "Evaluation created successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e, "Evaluation creation failed")),
    }
}

fn validate_create_request(create_data: &CreateEvaluationRequest) -> Result<(), String> {
    validate_name(&create_data.app_name).map_err(|e| format!("app_name: {e}"))?;
    if let Some(template_name) = &create_data.template_name {
        validate_name(template_name).map_err(|e| format!("template_name: {e}"))?;
    }
    for email in &create_data.shared_with {
        validate_email(email).map_err(|e| format!("shared_with '{email}': {e}"))?;
    }
    validate_questions(&create_data.questions)
}

/// 按 模板、题库、直接提供 的顺序组装题目，全部按值复制
async fn collect_questions(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    create_data: &CreateEvaluationRequest,
) -> Result<Vec<Question>, HttpResponse> {
    let mut questions = Vec::new();

    if let Some(template_id) = create_data.template_id {
        match storage.get_template_by_id(template_id).await {
            Ok(Some(template)) => {
                questions.extend(template.questions.iter().map(|q| q.to_question()));
            }
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TemplateNotFound,
                    format!("Template {template_id} not found"),
                )));
            }
            Err(e) => return Err(ApiResponse::from_error(&e, "Failed to load template")),
        }
    }

    if !create_data.user_question_ids.is_empty() {
        let found = storage
            .get_user_questions_by_ids(&create_data.user_question_ids)
            .await
            .map_err(|e| ApiResponse::from_error(&e, "Failed to load questions"))?;

        // 只能引用自己的题目或公开题目
        for id in &create_data.user_question_ids {
            match found
                .iter()
                .find(|q| q.id == *id && (q.is_public || q.created_by == user.id))
            {
                Some(question) => questions.push(Question {
                    is_custom: Some(true),
                    ..Question::blank(question.text.clone(), question.category.clone(), question.weight)
                }),
                None => {
                    return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::QuestionNotFound,
                        format!("Question {id} not found"),
                    )));
                }
            }
        }
    }

    questions.extend(create_data.questions.iter().cloned());

    for (index, question) in questions.iter_mut().enumerate() {
        question.order = Some(index as i32 + 1);
        question.weight = effective_weight(question.weight);
    }

    Ok(questions)
}
