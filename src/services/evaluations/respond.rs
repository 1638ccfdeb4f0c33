use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationService, load_evaluation};
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        entities::Question,
        requests::{ResponseUpsert, SubmitResponseRequest},
        responses::MyResponseDetail,
    },
};
use crate::services::current_user;
use crate::utils::scoring::progress_percent;
use crate::utils::validate::validate_questions;

/// 提交答卷：同一答题人对同一评估重复提交时覆盖原答卷
pub async fn submit_response(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    submission: SubmitResponseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let evaluation = match load_evaluation(&storage, evaluation_id).await {
        Ok(evaluation) => evaluation,
        Err(resp) => return Ok(resp),
    };

    if submission.questions.len() != evaluation.questions.len() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ResponseMismatch,
            format!(
                "Expected {} answers, got {}",
                evaluation.questions.len(),
                submission.questions.len()
            ),
        )));
    }

    if let Err(msg) = validate_questions(&submission.questions) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    // 题目内容与权重以评估为准，答卷只带回评分与评语
    let questions: Vec<Question> = evaluation
        .questions
        .iter()
        .zip(submission.questions)
        .map(|(template, answer)| Question {
            likert_score: answer.likert_score,
            comment: answer.comment,
            ..template.cleared()
        })
        .collect();

    let upsert = ResponseUpsert {
        evaluation_id,
        respondent_id: user.id.clone(),
        respondent_email: user.email.clone(),
        questions,
    };

    match storage.upsert_response(upsert).await {
        Ok(outcome) if outcome.created => {
            info!(
                "Response {} submitted by {} for evaluation {}",
                outcome.response.id, user.id, evaluation_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                outcome.response,
                "Response submitted successfully",
            )))
        }
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            outcome.response,
            "Response updated successfully",
        ))),
        Err(e) => Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
            ErrorCode::ResponseSaveFailed,
            format!("Failed to save response: {}", e.message()),
        ))),
    }
}

/// 获取当前用户对评估的答卷，用于预填
pub async fn get_my_response(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    if let Err(resp) = load_evaluation(&storage, evaluation_id).await {
        return Ok(resp);
    }

    match storage
        .get_response_by_respondent(evaluation_id, &user.id)
        .await
    {
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyResponseDetail {
                progress: progress_percent(&response.questions),
                response,
            },
            "Response retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResponseNotFound,
            "You have not answered this evaluation yet",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e, "Failed to get response")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::models::evaluations::entities::Question;
    use crate::routes;
    use crate::services::test_support::{ADMIN, EVALUATOR, bearer, state};
    use crate::storage::sea_orm_storage::sample_evaluation;

    #[actix_web::test]
    async fn test_resubmission_overwrites() {
        let (storage, cache) = state().await;
        let evaluation = storage
            .create_evaluation(sample_evaluation(
                ADMIN,
                vec![Question::blank("Texto claro?", "COMPREENSAO", 2.0)],
            ))
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_evaluation_routes),
        )
        .await;
        let uri = format!("/api/v1/evaluations/{}/responses", evaluation.id);

        // 还没有作答
        let req = test::TestRequest::get()
            .uri(&format!("{uri}/me"))
            .insert_header(bearer(EVALUATOR))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let submit = |score: i32| {
            test::TestRequest::put()
                .uri(&uri)
                .insert_header(bearer(EVALUATOR))
                .set_json(json!({"questions": [
                    // 提交的权重被忽略
                    {"text": "Texto claro?", "category": "COMPREENSAO", "weight": 9, "likert_score": score, "comment": "ok"}
                ]}))
                .to_request()
        };

        let resp = test::call_service(&app, submit(2)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = test::call_service(&app, submit(5)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("{uri}/me"))
            .insert_header(bearer(EVALUATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["questions"][0]["likert_score"], 5);
        assert_eq!(body["data"]["questions"][0]["weight"], 2.0);
        assert_eq!(body["data"]["questions"][0]["comment"], "ok");
        assert_eq!(body["data"]["progress"], 100);

        let parent = storage
            .get_evaluation_by_id(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parent.responses_count, 1);
    }

    #[actix_web::test]
    async fn test_rejects_mismatch_and_wrong_role() {
        let (storage, cache) = state().await;
        let evaluation = storage
            .create_evaluation(sample_evaluation(
                ADMIN,
                vec![Question::blank("Q1", "C", 1.0), Question::blank("Q2", "C", 1.0)],
            ))
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_evaluation_routes),
        )
        .await;
        let uri = format!("/api/v1/evaluations/{}/responses", evaluation.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(EVALUATOR))
            .set_json(json!({"questions": [{"text": "Q1", "category": "C", "likert_score": 3}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3001);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(EVALUATOR))
            .set_json(json!({"questions": [
                {"text": "Q1", "category": "C", "likert_score": 0},
                {"text": "Q2", "category": "C"}
            ]}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        // 管理员不作答
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(ADMIN))
            .set_json(json!({"questions": [
                {"text": "Q1", "category": "C", "likert_score": 3},
                {"text": "Q2", "category": "C"}
            ]}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::put()
            .uri("/api/v1/evaluations/4242/responses")
            .insert_header(bearer(EVALUATOR))
            .set_json(json!({"questions": []}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
