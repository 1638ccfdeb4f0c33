use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationService, load_owned_evaluation};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

/// 删除评估，已有答卷保留为孤立答卷
pub async fn delete_evaluation(
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

    match storage.delete_evaluation(evaluation_id).await {
        Ok(true) => {
            info!("Evaluation {} deleted by {}", evaluation_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Evaluation deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "Evaluation not found",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e, "Evaluation deletion failed")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;

    use crate::models::evaluations::{entities::Question, requests::ResponseUpsert};
    use crate::routes;
    use crate::services::test_support::{ADMIN, EVALUATOR, bearer, state};
    use crate::storage::sea_orm_storage::sample_evaluation;

    #[actix_web::test]
    async fn test_delete_keeps_orphaned_responses() {
        let (storage, cache) = state().await;
        let evaluation = storage
            .create_evaluation(sample_evaluation(
                ADMIN,
                vec![Question::blank("Q", "C", 1.0)],
            ))
            .await
            .unwrap();
        storage
            .upsert_response(ResponseUpsert {
                evaluation_id: evaluation.id,
                respondent_id: EVALUATOR.to_string(),
                respondent_email: "e@example.com".to_string(),
                questions: vec![Question {
                    likert_score: Some(5),
                    ..Question::blank("Q", "C", 1.0)
                }],
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_evaluation_routes),
        )
        .await;
        let uri = format!("/api/v1/evaluations/{}", evaluation.id);

        // 评估员不能删除
        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(EVALUATOR))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(ADMIN))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(ADMIN))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluations/orphaned-responses")
            .insert_header(bearer(ADMIN))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0]["evaluation_id"].is_null());
        assert_eq!(items[0]["original_evaluation_id"], evaluation.id);
    }
}
