pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::templates::requests::CreateTemplateRequest;
use crate::storage::Storage;

/// 模板列表的缓存键
pub(crate) const TEMPLATE_LIST_CACHE_KEY: &str = "templates:all";

pub struct TemplateService {
    storage: Option<Arc<dyn Storage>>,
}

impl TemplateService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(&self.storage, request)
    }

    // 未配置缓存时直接读写存储
    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|data| data.get_ref().clone())
    }

    // 获取全部模板
    pub async fn list_templates(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_templates(self, request).await
    }

    // 创建模板
    pub async fn create_template(
        &self,
        request: &HttpRequest,
        create_data: CreateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_template(self, request, create_data).await
    }

    // 删除模板
    pub async fn delete_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_template(self, request, template_id).await
    }

    // 模板变更后使缓存失效
    pub(crate) async fn invalidate_list_cache(&self, request: &HttpRequest) {
        if let Some(cache) = self.get_cache(request) {
            cache.remove(TEMPLATE_LIST_CACHE_KEY).await;
        }
    }
}
