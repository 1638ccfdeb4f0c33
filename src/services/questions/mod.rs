pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::{
    CreateUserQuestionRequest, QuestionQueryParams, UpdateVisibilityRequest,
};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(&self.storage, request)
    }

    // 创建题目
    pub async fn create_question(
        &self,
        request: &HttpRequest,
        create_data: CreateUserQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, create_data).await
    }

    // 按范围获取题目列表
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: QuestionQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, query).await
    }

    // 修改题目可见性
    pub async fn update_visibility(
        &self,
        request: &HttpRequest,
        question_id: i64,
        update_data: UpdateVisibilityRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_visibility(self, request, question_id, update_data).await
    }

    // 删除题目
    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, question_id).await
    }
}
