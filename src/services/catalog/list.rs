use actix_web::{HttpResponse, Result as ActixResult};

use super::{COGA_CATEGORIES, LIKERT_OPTIONS};
use crate::models::ApiResponse;

pub async fn list_likert_options() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LIKERT_OPTIONS.to_vec(),
        "Likert options retrieved successfully",
    )))
}

pub async fn list_categories() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        COGA_CATEGORIES.to_vec(),
        "Categories retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::routes;
    use crate::utils::scoring::{LIKERT_MAX, LIKERT_MIN};

    #[actix_web::test]
    async fn test_catalog_is_public() {
        let app = test::init_service(App::new().configure(routes::configure_catalog_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/catalog/likert")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let options = body["data"].as_array().unwrap();
        assert_eq!(options.len(), (LIKERT_MAX - LIKERT_MIN + 1) as usize);
        assert_eq!(options[0]["value"], LIKERT_MIN);
        assert_eq!(options[4]["label"], "Concordo Totalmente");

        let req = test::TestRequest::get()
            .uri("/api/v1/catalog/categories")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 16);
    }
}
