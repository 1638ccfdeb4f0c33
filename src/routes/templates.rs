use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::templates::requests::CreateTemplateRequest;
use crate::services::TemplateService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TEMPLATE_SERVICE 实例
static TEMPLATE_SERVICE: Lazy<TemplateService> = Lazy::new(TemplateService::new_lazy);

pub async fn list_templates(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.list_templates(&req).await
}

pub async fn create_template(
    req: HttpRequest,
    create_data: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE
        .create_template(&req, create_data.into_inner())
        .await
}

pub async fn delete_template(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.delete_template(&req, id.0).await
}

// 配置路由
pub fn configure_template_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/templates")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_templates))
                    .route(
                        web::post()
                            .to(create_template)
                            .wrap(middlewares::RateLimit::writes("templates")),
                    ),
            )
            // 预置模板只读，用户模板仅创建者可删除
            .service(web::resource("/{id}").route(web::delete().to(delete_template))),
    );
}
