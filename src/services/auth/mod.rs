//! 身份信息
//!
//! 注册、登录与登出由外部身份提供方完成，这里只返回令牌中的身份。

pub mod me;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct AuthService;

impl AuthService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 获取当前身份
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_me(request).await
    }
}
