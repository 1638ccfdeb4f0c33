use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TemplateService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_template(
    service: &TemplateService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let template = match storage.get_template_by_id(template_id).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TemplateNotFound,
                "Template not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_error(&e, "Failed to get template")),
    };

    if template.is_predefined() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::TemplateReadOnly,
            "Predefined templates cannot be deleted",
        )));
    }
    if template.created_by.as_deref() != Some(user.id.as_str()) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only delete your own templates",
        )));
    }

    match storage.delete_template(template_id).await {
        Ok(true) => {
            info!("Template {} deleted by {}", template_id, user.id);
            service.invalidate_list_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Template deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "Template not found",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e, "Template deletion failed")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::models::templates::{entities::TemplateQuestion, requests::NewTemplate};
    use crate::routes;
    use crate::services::test_support::{ADMIN, OTHER_ADMIN, bearer, state};

    #[actix_web::test]
    async fn test_template_lifecycle_and_cache() {
        let (storage, cache) = state().await;
        let predefined = storage
            .create_template(NewTemplate {
                name: "Acessibilidade Web Básica".to_string(),
                category: "Geral".to_string(),
                description: None,
                questions: vec![TemplateQuestion {
                    text: "Q".to_string(),
                    category: "C".to_string(),
                    weight: 1.0,
                }],
                created_by: None,
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .configure(routes::configure_template_routes),
        )
        .await;

        let list = |uid: &str| {
            test::TestRequest::get()
                .uri("/api/v1/templates")
                .insert_header(bearer(uid))
                .to_request()
        };

        // 首次读取后写入缓存
        let body: Value = test::call_and_read_body_json(&app, list(ADMIN)).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/templates")
            .insert_header(bearer(ADMIN))
            .set_json(json!({
                "name": "Meu modelo",
                "category": "Formulários",
                "questions": [{"text": "Os campos têm rótulos?", "category": "FORMULARIOS"}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["questions"][0]["weight"], 1.0);

        // 创建后缓存失效，新模板排在预置模板之后
        let body: Value = test::call_and_read_body_json(&app, list(ADMIN)).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], predefined.id);
        assert_eq!(items[1]["id"], id);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/templates/{}", predefined.id))
            .insert_header(bearer(ADMIN))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 5101);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/templates/{id}"))
            .insert_header(bearer(OTHER_ADMIN))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/templates/{id}"))
            .insert_header(bearer(ADMIN))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body: Value = test::call_and_read_body_json(&app, list(OTHER_ADMIN)).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    }
}
