use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{
    ApiResponse,
    questions::{requests::QuestionQueryParams, responses::UserQuestionListResponse},
};
use crate::services::current_user;

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    query: QuestionQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage
        .list_user_questions(&user.id, query.scope, query.category.as_deref())
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserQuestionListResponse { items },
            "Question list retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve question list",
        )),
    }
}
