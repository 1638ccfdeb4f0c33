use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{
    CreateUserQuestionRequest, QuestionQueryParams, UpdateVisibilityRequest,
};
use crate::services::QuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 QUESTION_SERVICE 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionQueryParams>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions(&req, query.into_inner())
        .await
}

pub async fn create_question(
    req: HttpRequest,
    create_data: web::Json<CreateUserQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, create_data.into_inner())
        .await
}

pub async fn update_visibility(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateVisibilityRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .update_visibility(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(&req, id.0).await
}

// 配置路由
pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_questions))
                    .route(
                        web::post()
                            .to(create_question)
                            .wrap(middlewares::RateLimit::writes("questions")),
                    ),
            )
            // 创建者修改或删除自己的题目
            .service(web::resource("/{id}/visibility").route(web::put().to(update_visibility)))
            .service(web::resource("/{id}").route(web::delete().to(delete_question))),
    );
}
