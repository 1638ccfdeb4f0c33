use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{TEMPLATE_LIST_CACHE_KEY, TemplateService};
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::models::{ApiResponse, templates::responses::TemplateListResponse};

/// 预置模板在前，用户模板在后
pub async fn list_templates(
    service: &TemplateService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);

    if let Some(cache) = &cache
        && let CacheResult::Found(list) = cache
            .get_json::<TemplateListResponse>(TEMPLATE_LIST_CACHE_KEY)
            .await
    {
        debug!("Template list served from cache");
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Template list retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.list_templates().await {
        Ok(items) => {
            let list = TemplateListResponse { items };
            if let Some(cache) = &cache {
                cache
                    .insert_json(
                        TEMPLATE_LIST_CACHE_KEY,
                        &list,
                        AppConfig::get().cache.default_ttl,
                    )
                    .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                list,
                "Template list retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve template list",
        )),
    }
}
