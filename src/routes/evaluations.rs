use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::UserRole;
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, SubmitResponseRequest, UpdateEvaluationRequest,
};
use crate::services::EvaluationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 EVALUATION_SERVICE 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn list_evaluations(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_evaluations(&req).await
}

pub async fn create_evaluation(
    req: HttpRequest,
    create_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(&req, create_data.into_inner())
        .await
}

pub async fn get_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_evaluation(&req, id.0).await
}

pub async fn update_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .update_evaluation(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.delete_evaluation(&req, id.0).await
}

pub async fn submit_response(
    req: HttpRequest,
    id: SafeIDI64,
    submission: web::Json<SubmitResponseRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_response(&req, id.0, submission.into_inner())
        .await
}

pub async fn get_my_response(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_my_response(&req, id.0).await
}

pub async fn list_responses(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_responses(&req, id.0).await
}

pub async fn list_orphaned_responses(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_orphaned_responses(&req).await
}

pub async fn get_results(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_results(&req, id.0).await
}

pub async fn export_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.export_evaluation(&req, id.0).await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                // 管理员查询自己的评估，评估员查询全部评估
                web::resource("").route(web::get().to(list_evaluations)).route(
                    web::post()
                        .to(create_evaluation)
                        // 仅管理员可以创建评估
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                        .wrap(middlewares::RateLimit::writes("evaluations")),
                ),
            )
            // 必须在 /{id} 之前注册
            .service(
                web::resource("/orphaned-responses").route(
                    web::get()
                        .to(list_orphaned_responses)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_evaluation))
                    .route(
                        web::put()
                            .to(update_evaluation)
                            // 创建者更新自己的评估
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_evaluation)
                            // 创建者删除自己的评估
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/responses")
                    .route(
                        web::get()
                            .to(list_responses)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::put()
                            .to(submit_response)
                            // 评估员提交或覆盖自己的答卷
                            .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles()))
                            .wrap(middlewares::RateLimit::writes("responses")),
                    ),
            )
            .service(
                web::resource("/{id}/responses/me").route(
                    web::get()
                        .to(get_my_response)
                        .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                ),
            )
            .service(
                web::resource("/{id}/results").route(
                    web::get()
                        .to(get_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}/export").route(
                    web::get()
                        .to(export_evaluation)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
