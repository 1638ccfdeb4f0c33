use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
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
                "You can only delete your own questions",
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

    // 已引入评估的题目按值复制，删除不影响评估
    match storage.delete_user_question(question_id).await {
        Ok(true) => {
            info!("Question {} deleted by {}", question_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Question deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e, "Question deletion failed")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::routes;
    use crate::services::test_support::{ADMIN, EVALUATOR, bearer, state};

    #[actix_web::test]
    async fn test_question_lifecycle() {
        let (storage, cache) = state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_question_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/questions")
            .insert_header(bearer(ADMIN))
            .set_json(json!({"text": "Os ícones têm rótulos?", "category": "VISUAL", "weight": 2}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["is_public"], false);

        // 私有题目不出现在公开列表
        let req = test::TestRequest::get()
            .uri("/api/v1/questions?scope=public")
            .insert_header(bearer(EVALUATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["items"].as_array().unwrap().is_empty());

        // 只有创建者可以修改可见性
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/questions/{id}/visibility"))
            .insert_header(bearer(EVALUATOR))
            .set_json(json!({"is_public": true}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/questions/{id}/visibility"))
            .insert_header(bearer(ADMIN))
            .set_json(json!({"is_public": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_public"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/questions?scope=public&category=VISUAL")
            .insert_header(bearer(EVALUATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/questions")
            .insert_header(bearer(ADMIN))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"][0]["id"], id);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/questions/{id}"))
            .insert_header(bearer(ADMIN))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/questions/{id}"))
            .insert_header(bearer(ADMIN))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
