//! 身份令牌校验
//!
//! 令牌由外部身份提供方使用 HS256 签发，本服务只负责校验与解析。

use crate::config::AppConfig;
use crate::models::auth::entities::{AuthUser, UserRole};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Subject (身份提供方的用户 ID)
    pub email: String, // 用户邮箱
    pub role: String,  // 用户角色: "adm" 或 "evaluator"
    pub exp: usize,    // Expiration time (时间戳)
    #[serde(default)]
    pub iat: usize, // Issued at (签发时间)
}

impl Claims {
    /// 转换为请求身份
    pub fn into_auth_user(self) -> Result<AuthUser, String> {
        let role = self.role.parse::<UserRole>()?;
        if self.sub.trim().is_empty() {
            return Err("Missing subject in token".to_string());
        }
        Ok(AuthUser {
            id: self.sub,
            email: self.email,
            role,
        })
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 构建校验规则
    fn validation(config: &AppConfig) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.jwt.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.jwt.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }

    // 使用指定配置验证 token
    pub fn verify_token_with(
        token: &str,
        config: &AppConfig,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(config.jwt.secret.as_ref());
        decode::<Claims>(token, &decoding_key, &Self::validation(config))
            .map(|token_data| token_data.claims)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_with(token, AppConfig::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn test_config() -> AppConfig {
        let mut config = AppConfig::load().expect("defaults should be enough");
        config.jwt.secret = "test-secret".to_string();
        config.jwt.issuer = None;
        config.jwt.audience = None;
        config
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: &str, exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "uid-1".to_string(),
            email: "ana@example.com".to_string(),
            role: role.to_string(),
            exp: (now + exp_offset) as usize,
            iat: now as usize,
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let config = test_config();
        let token = sign(&claims("adm", 3600), "test-secret");
        let user = JwtUtils::verify_token_with(&token, &config)
            .unwrap()
            .into_auth_user()
            .unwrap();
        assert_eq!(user.id, "uid-1");
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn test_reject_wrong_secret_and_expired() {
        let config = test_config();
        let forged = sign(&claims("adm", 3600), "other-secret");
        assert!(JwtUtils::verify_token_with(&forged, &config).is_err());

        let expired = sign(&claims("evaluator", -3600), "test-secret");
        assert!(JwtUtils::verify_token_with(&expired, &config).is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(claims("guest", 60).into_auth_user().is_err());
    }
}
