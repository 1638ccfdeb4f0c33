pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod respond;
pub mod responses;
pub mod results;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::entities::AuthUser,
    evaluations::{
        entities::Evaluation,
        requests::{CreateEvaluationRequest, SubmitResponseRequest, UpdateEvaluationRequest},
    },
};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(&self.storage, request)
    }

    // 创建评估
    pub async fn create_evaluation(
        &self,
        request: &HttpRequest,
        create_data: CreateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluation(self, request, create_data).await
    }

    // 获取评估详情
    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluation(self, request, evaluation_id).await
    }

    // 获取评估列表
    pub async fn list_evaluations(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_evaluations(self, request).await
    }

    // 更新评估
    pub async fn update_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        update_data: UpdateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_evaluation(self, request, evaluation_id, update_data).await
    }

    // 删除评估
    pub async fn delete_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_evaluation(self, request, evaluation_id).await
    }

    // 提交或覆盖自己的答卷
    pub async fn submit_response(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        submission: SubmitResponseRequest,
    ) -> ActixResult<HttpResponse> {
        respond::submit_response(self, request, evaluation_id, submission).await
    }

    // 获取自己的答卷
    pub async fn get_my_response(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        respond::get_my_response(self, request, evaluation_id).await
    }

    // 列出评估的全部答卷
    pub async fn list_responses(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        responses::list_responses(self, request, evaluation_id).await
    }

    // 列出孤立答卷
    pub async fn list_orphaned_responses(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        responses::list_orphaned_responses(self, request).await
    }

    // 获取评估结果
    pub async fn get_results(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::get_results(self, request, evaluation_id).await
    }

    // 导出评估
    pub async fn export_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_evaluation(self, request, evaluation_id).await
    }
}

/// 查询评估，不存在时返回 404 响应
pub(crate) async fn load_evaluation(
    storage: &Arc<dyn Storage>,
    evaluation_id: i64,
) -> Result<Evaluation, HttpResponse> {
    match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => Ok(evaluation),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "Evaluation not found",
        ))),
        Err(e) => Err(ApiResponse::from_error(
            &e,
            "Failed to get evaluation information",
        )),
    }
}

/// 查询评估并校验当前用户是否为创建者
pub(crate) async fn load_owned_evaluation(
    storage: &Arc<dyn Storage>,
    evaluation_id: i64,
    user: &AuthUser,
) -> Result<Evaluation, HttpResponse> {
    let evaluation = load_evaluation(storage, evaluation_id).await?;
    if !evaluation.is_owned_by(&user.id) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EvaluationPermissionDenied,
            "You do not have permission to manage this evaluation",
        )));
    }
    Ok(evaluation)
}
