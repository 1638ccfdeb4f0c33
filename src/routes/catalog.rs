use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::CatalogService;

static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_likert_options() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_likert_options().await
}

pub async fn list_categories() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_categories().await
}

// 配置路由（公开，无需认证）
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/catalog")
            .route("/likert", web::get().to(list_likert_options))
            .route("/categories", web::get().to(list_categories)),
    );
}
