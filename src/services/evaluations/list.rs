use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{
    ApiResponse, auth::entities::UserRole, evaluations::responses::EvaluationListResponse,
};
use crate::services::current_user;

/// 管理员只看到自己创建的评估，评估员看到全部评估以便作答
pub async fn list_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let owner_filter = match user.role {
        UserRole::Admin => Some(user.id.as_str()),
        UserRole::Evaluator => None,
    };

    match storage.list_evaluations(owner_filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EvaluationListResponse { items },
            "Evaluation list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve evaluation list",
        )),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::routes;
    use crate::storage::sea_orm_storage::sample_evaluation;
    use crate::services::test_support::{ADMIN, EVALUATOR, OTHER_ADMIN, bearer, state};

    #[actix_web::test]
    async fn test_list_visibility_by_role() {
        let (storage, cache) = state().await;
        for owner in [ADMIN, OTHER_ADMIN, ADMIN] {
            storage
                .create_evaluation(sample_evaluation(owner, vec![]))
                .await
                .unwrap();
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_evaluation_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluations")
            .insert_header(bearer(ADMIN))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|e| e["evaluator_id"] == ADMIN));

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluations")
            .insert_header(bearer(EVALUATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
    }
}
