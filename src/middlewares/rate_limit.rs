/*!
 * 写操作限流
 *
 * 创建评估、提交答卷、创建题目与模板这几类写请求按作用域分别计数。
 * 已登录请求以用户 ID 计数，未登录请求按客户端地址计数。
 *
 * 采用固定窗口：某个键的首个请求打开窗口，窗口内超出次数返回 429，
 * `Retry-After` 为窗口剩余秒数。
 *
 * ```rust,ignore
 * web::resource("/{id}/responses").route(
 *     web::put()
 *         .to(submit_response)
 *         .wrap(RateLimit::writes("responses")),
 * );
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, auth::entities::AuthUser};

// 空闲超过一小时的计数直接淘汰
const IDLE_EVICTION: Duration = Duration::from_secs(3600);

/// 某个键当前窗口的计数
#[derive(Clone, Copy, Debug)]
struct QuotaWindow {
    opened_at: Instant,
    used: u32,
}

impl QuotaWindow {
    fn open(now: Instant) -> Self {
        Self {
            opened_at: now,
            used: 1,
        }
    }

    /// 窗口未过期则累加，否则重新打开
    fn advance(previous: Option<Self>, now: Instant, window: Duration) -> Self {
        match previous {
            Some(w) if now.duration_since(w.opened_at) < window => Self {
                used: w.used.saturating_add(1),
                ..w
            },
            _ => Self::open(now),
        }
    }

    /// 窗口剩余秒数，向上取整且至少为 1
    fn retry_after(&self, now: Instant, window: Duration) -> u64 {
        let left = window.saturating_sub(now.duration_since(self.opened_at));
        (left.as_secs() + u64::from(left.subsec_nanos() > 0)).max(1)
    }
}

static QUOTAS: Lazy<Cache<String, QuotaWindow>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(IDLE_EVICTION)
        .max_capacity(100_000)
        .build()
});

/// 限流配置，作为 `wrap` 的参数挂在单个路由上
#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            scope: String::new(),
        }
    }

    pub fn with_prefix(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    /// 写操作限流，次数与窗口取自 `server.limits`
    pub fn writes(scope: &str) -> Self {
        let limits = &AppConfig::get().server.limits;
        let max_requests = u32::try_from(limits.rate_limit_requests).unwrap_or(u32::MAX);
        Self::new(max_requests, limits.rate_limit_window).with_prefix(scope)
    }
}

/// 计数键：作用域 + 用户或地址
fn quota_key(scope: &str, req: &ServiceRequest) -> String {
    let user_id = req.extensions().get::<AuthUser>().map(|user| user.id.clone());
    let who = match user_id {
        Some(id) => format!("user:{id}"),
        None => format!(
            "addr:{}",
            req.connection_info().realip_remote_addr().unwrap_or("unknown")
        ),
    };
    format!("{scope}:{who}")
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let RateLimit {
            max_requests,
            window_secs,
            scope,
        } = self.limit.clone();

        Box::pin(async move {
            let key = quota_key(&scope, &req);
            let window = Duration::from_secs(window_secs);
            let now = Instant::now();

            // 读取与累加在同一次 upsert 中完成
            let current = QUOTAS
                .entry(key.clone())
                .and_upsert_with(|previous| async move {
                    QuotaWindow::advance(previous.map(|e| e.into_value()), now, window)
                })
                .await
                .into_value();

            if current.used > max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{} in {}s)",
                    key, current.used, max_requests, window_secs
                );
                let response = too_many_requests(current.retry_after(now, window));
                return Ok(req.into_response(response.map_into_right_body()));
            }

            let remaining = max_requests - current.used;
            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    #[actix_web::test]
    async fn test_writes_preset_uses_config() {
        let limits = &AppConfig::get().server.limits;
        let writes = RateLimit::writes("responses");
        assert_eq!(u64::from(writes.max_requests), limits.rate_limit_requests);
        assert_eq!(writes.window_secs, limits.rate_limit_window.max(1));
        assert_eq!(writes.scope, "responses");
    }

    #[actix_web::test]
    async fn test_window_reopens_after_expiry() {
        let window = Duration::from_secs(10);
        let start = Instant::now();

        let first = QuotaWindow::advance(None, start, window);
        let second = QuotaWindow::advance(Some(first), start + Duration::from_secs(4), window);
        assert_eq!(second.used, 2);
        assert_eq!(second.opened_at, start);
        assert_eq!(second.retry_after(start + Duration::from_millis(4500), window), 6);

        let reopened = QuotaWindow::advance(Some(second), start + window, window);
        assert_eq!(reopened.used, 1);
        assert_eq!(reopened.opened_at, start + window);
    }

    #[actix_web::test]
    async fn test_exceeding_limit_returns_429() {
        let app = test::init_service(
            App::new().route(
                "/limited",
                web::post()
                    .to(|| async { HttpResponse::Ok().finish() })
                    .wrap(RateLimit::new(2, 60).with_prefix("test_exceeding_limit")),
            ),
        )
        .await;

        for expected_remaining in ["1", "0"] {
            let req = test::TestRequest::post().uri("/limited").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok()),
                Some(expected_remaining)
            );
        }

        let req = test::TestRequest::post().uri("/limited").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!((1..=60).contains(&retry_after));
    }
}
